use chrono::Local;
use dashboard::dashboards::d400_order_analytics::{OrdersController, StatsScope};
use dashboard::shared::api::HttpOrdersApi;
use dashboard::shared::config;
use dashboard::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;
    tracing::info!("Orders API: {}", config.api.base_url);

    let api = HttpOrdersApi::new(&config.api)?;
    let mut controller = OrdersController::new(api);

    let snapshot = controller.fetch_and_merge().await;
    if snapshot.is_total_failure() {
        anyhow::bail!(
            "Could not load product or service orders from {}",
            config.api.base_url
        );
    }
    if snapshot.is_empty() {
        tracing::info!("No orders yet");
    }
    let merged_count = snapshot.merged.len();

    let now = Local::now();
    let report = serde_json::json!({
        "orders": merged_count,
        "products": controller.compute_stats(StatsScope::Products, &now),
        "services": controller.compute_stats(StatsScope::Services, &now),
        "all": controller.compute_stats(StatsScope::All, &now),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
