use chrono::{DateTime, TimeZone};
use contracts::dashboards::d400_order_analytics::StatsSummary;
use contracts::domain::common::{Order, OrderKind};

use super::error::OrdersError;
use super::merger::{merge_orders, sort_by_date_desc};
use super::normalizer::{
    normalize_product, normalize_product_orders, normalize_service, normalize_service_orders,
};
use super::service::compute_stats;
use crate::shared::api::{ApiError, OrdersApi};

/// Результат загрузки одного источника
#[derive(Debug, Clone, Default)]
pub enum SourceStatus {
    /// Загрузки еще не было
    #[default]
    NotLoaded,
    Loaded,
    /// Источник не ответил; его заказы считаются пустым списком
    Failed(ApiError),
}

impl SourceStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceStatus::Failed(_))
    }
}

/// Снимок списков заказов, которым владеет контроллер
#[derive(Debug, Clone, Default)]
pub struct OrdersSnapshot {
    pub product_orders: Vec<Order>,
    pub service_orders: Vec<Order>,
    /// Оба вида вместе, новые сверху
    pub merged: Vec<Order>,
    pub product_source: SourceStatus,
    pub service_source: SourceStatus,
}

impl OrdersSnapshot {
    /// Не загрузился ни один источник: показывать ошибку с повтором, а не пустой список
    pub fn is_total_failure(&self) -> bool {
        self.product_source.is_failed() && self.service_source.is_failed()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    pub fn orders(&self, kind: OrderKind) -> &[Order] {
        match kind {
            OrderKind::Product => &self.product_orders,
            OrderKind::Service => &self.service_orders,
        }
    }

    pub fn find(&self, id: &str, kind: OrderKind) -> Option<&Order> {
        self.orders(kind).iter().find(|o| o.id == id)
    }

    fn orders_mut(&mut self, kind: OrderKind) -> &mut Vec<Order> {
        match kind {
            OrderKind::Product => &mut self.product_orders,
            OrderKind::Service => &mut self.service_orders,
        }
    }
}

/// По какому списку считать статистику
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    Products,
    Services,
    All,
}

/// Владелец состояния экрана заказов.
///
/// Состояние меняется только через `fetch_and_merge`, `update_status`,
/// `update_payment_status` и `refresh_order`; отображение читает снимок.
pub struct OrdersController<A: OrdersApi> {
    api: A,
    snapshot: OrdersSnapshot,
}

impl<A: OrdersApi> OrdersController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            snapshot: OrdersSnapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &OrdersSnapshot {
        &self.snapshot
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Загрузить оба источника параллельно, нормализовать и объединить.
    ///
    /// Не возвращает ошибку: упавший источник дает пустой список,
    /// причина сохраняется в `SourceStatus::Failed`.
    pub async fn fetch_and_merge(&mut self) -> &OrdersSnapshot {
        let (products, services) = tokio::join!(
            self.api.list_product_orders(),
            self.api.list_service_orders()
        );

        let (product_orders, product_source) =
            settle(OrderKind::Product, products.map(normalize_product_orders));
        let (service_orders, service_source) =
            settle(OrderKind::Service, services.map(normalize_service_orders));

        let merged = merge_orders(&product_orders, &service_orders);

        tracing::info!(
            "Orders loaded: {} product, {} service, {} merged",
            product_orders.len(),
            service_orders.len(),
            merged.len()
        );

        self.snapshot = OrdersSnapshot {
            product_orders,
            service_orders,
            merged,
            product_source,
            service_source,
        };

        if self.snapshot.is_total_failure() {
            tracing::error!("Both order sources failed to load");
        }

        &self.snapshot
    }

    /// Сменить статус заказа на бэкенде и, после подтверждения, в снимке
    pub async fn update_status(
        &mut self,
        id: &str,
        kind: OrderKind,
        new_status: &str,
    ) -> Result<(), OrdersError> {
        require_id(id, kind)?;
        if !kind.is_valid_status(new_status) {
            return Err(OrdersError::InvalidStatus {
                kind,
                value: new_status.to_string(),
            });
        }

        let result = match kind {
            OrderKind::Product => self.api.update_product_status(id, new_status).await,
            OrderKind::Service => self.api.update_service_status(id, new_status).await,
        };
        if let Err(e) = result {
            tracing::error!("Failed to update status of {} order {}: {}", kind, id, e);
            return Err(e.into());
        }

        self.patch(id, kind, |order| order.status = new_status.to_string());
        Ok(())
    }

    /// Сменить статус оплаты заказа на бэкенде и, после подтверждения, в снимке
    pub async fn update_payment_status(
        &mut self,
        id: &str,
        kind: OrderKind,
        new_value: &str,
    ) -> Result<(), OrdersError> {
        require_id(id, kind)?;
        if !kind.is_valid_payment_status(new_value) {
            return Err(OrdersError::InvalidPaymentStatus {
                kind,
                value: new_value.to_string(),
            });
        }

        let result = match kind {
            OrderKind::Product => self.api.update_product_payment(id, new_value).await,
            OrderKind::Service => self.api.update_service_payment(id, new_value).await,
        };
        if let Err(e) = result {
            tracing::error!(
                "Failed to update payment status of {} order {}: {}",
                kind,
                id,
                e
            );
            return Err(e.into());
        }

        self.patch(id, kind, |order| order.payment_status = new_value.to_string());
        Ok(())
    }

    /// Перечитать один заказ с бэкенда и заменить его в снимке.
    /// Ручная сверка после неудачного изменения; сама мутация ничего не перечитывает.
    pub async fn refresh_order(&mut self, id: &str, kind: OrderKind) -> Result<(), OrdersError> {
        require_id(id, kind)?;
        let mut fresh = match kind {
            OrderKind::Product => normalize_product(self.api.get_product_order(id).await?),
            OrderKind::Service => normalize_service(self.api.get_service_order(id).await?),
        };
        if fresh.id.is_empty() {
            fresh.id = id.to_string();
        }

        let list = self.snapshot.orders_mut(kind);
        match list.iter_mut().find(|o| o.id == id) {
            Some(existing) => *existing = fresh.clone(),
            None => list.push(fresh.clone()),
        }

        let merged = &mut self.snapshot.merged;
        match merged.iter_mut().find(|o| o.id == id && o.kind == kind) {
            Some(existing) => *existing = fresh,
            None => merged.push(fresh),
        }
        sort_by_date_desc(merged);

        Ok(())
    }

    /// Статистика по текущему снимку, включая уже примененные изменения
    pub fn compute_stats<Tz: TimeZone>(&self, scope: StatsScope, now: &DateTime<Tz>) -> StatsSummary {
        match scope {
            StatsScope::Products => compute_stats(&self.snapshot.product_orders, now),
            StatsScope::Services => compute_stats(&self.snapshot.service_orders, now),
            StatsScope::All => compute_stats(&self.snapshot.merged, now),
        }
    }

    /// Применить изменение к заказу в списке его вида и в общем списке
    fn patch(&mut self, id: &str, kind: OrderKind, apply: impl Fn(&mut Order)) {
        let OrdersSnapshot {
            product_orders,
            service_orders,
            merged,
            ..
        } = &mut self.snapshot;
        let list = match kind {
            OrderKind::Product => product_orders,
            OrderKind::Service => service_orders,
        };

        let mut patched = 0;
        for order in list
            .iter_mut()
            .chain(merged.iter_mut())
            .filter(|o| o.id == id && o.kind == kind)
        {
            apply(order);
            patched += 1;
        }

        if patched == 0 {
            // список успели перезагрузить, заказа в нем уже нет
            tracing::warn!("{} order {} is not in the current list, nothing to patch", kind, id);
        }
    }
}

/// Заказы без id нормализуются с пустым id; изменение по нему задело бы их все
fn require_id(id: &str, kind: OrderKind) -> Result<(), OrdersError> {
    if id.trim().is_empty() {
        return Err(OrdersError::MissingId(kind));
    }
    Ok(())
}

fn settle(kind: OrderKind, result: Result<Vec<Order>, ApiError>) -> (Vec<Order>, SourceStatus) {
    match result {
        Ok(orders) => (orders, SourceStatus::Loaded),
        Err(e) => {
            tracing::warn!("Failed to load {} orders, treating as empty: {}", kind, e);
            (Vec::new(), SourceStatus::Failed(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_product_order::ProductOrderDto;
    use contracts::domain::a002_service_order::ServiceOrderDto;
    use serde_json::json;
    use std::sync::Mutex;

    /// Бэкенд в памяти; `None` в списке означает сетевую ошибку
    #[derive(Default)]
    struct MockApi {
        products: Mutex<Option<Vec<ProductOrderDto>>>,
        services: Mutex<Option<Vec<ServiceOrderDto>>>,
        reject_mutations: bool,
        calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn new(products: Option<Vec<ProductOrderDto>>, services: Option<Vec<ServiceOrderDto>>) -> Self {
            Self {
                products: Mutex::new(products),
                services: Mutex::new(services),
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(call);
            if self.reject_mutations {
                Err(ApiError::Rejected("validation failed".into()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    fn offline() -> ApiError {
        ApiError::Network("connection refused".into())
    }

    #[async_trait]
    impl OrdersApi for MockApi {
        async fn list_product_orders(&self) -> Result<Vec<ProductOrderDto>, ApiError> {
            self.products.lock().unwrap().clone().ok_or_else(offline)
        }

        async fn list_service_orders(&self) -> Result<Vec<ServiceOrderDto>, ApiError> {
            self.services.lock().unwrap().clone().ok_or_else(offline)
        }

        async fn get_product_order(&self, id: &str) -> Result<ProductOrderDto, ApiError> {
            self.list_product_orders()
                .await?
                .into_iter()
                .find(|o| o.mongo_id == Some(json!(id)))
                .ok_or(ApiError::Http {
                    status: 404,
                    body: "Order not found".into(),
                })
        }

        async fn get_service_order(&self, id: &str) -> Result<ServiceOrderDto, ApiError> {
            self.list_service_orders()
                .await?
                .into_iter()
                .find(|o| o.mongo_id == Some(json!(id)))
                .ok_or(ApiError::Http {
                    status: 404,
                    body: "Order not found".into(),
                })
        }

        async fn update_product_status(&self, id: &str, status: &str) -> Result<(), ApiError> {
            self.record(format!("orders/{}/status={}", id, status))
        }

        async fn update_product_payment(&self, id: &str, value: &str) -> Result<(), ApiError> {
            self.record(format!("orders/{}/payment={}", id, value))
        }

        async fn update_service_status(&self, id: &str, status: &str) -> Result<(), ApiError> {
            self.record(format!("buyservices/{}/status={}", id, status))
        }

        async fn update_service_payment(&self, id: &str, value: &str) -> Result<(), ApiError> {
            self.record(format!("buyservices/{}/payment={}", id, value))
        }
    }

    fn product(id: &str, status: &str, amount: f64, date: &str) -> ProductOrderDto {
        serde_json::from_value(json!({
            "_id": id,
            "customerName": format!("Customer {}", id),
            "phoneNumber": "01700000000",
            "productName": "Router",
            "paymentMethod": "cod",
            "status": status,
            "paymentStatus": "pending",
            "totalAmount": amount,
            "orderDate": date
        }))
        .unwrap()
    }

    fn service(id: &str, status: &str, amount: f64, date: &str) -> ServiceOrderDto {
        serde_json::from_value(json!({
            "_id": id,
            "name": format!("Client {}", id),
            "phone": "555",
            "serviceName": "Web Development",
            "paymentMethod": "bkash",
            "transactionId": "TX1",
            "status": status,
            "paymentStatus": "pending",
            "totalAmount": amount,
            "createdAt": date
        }))
        .unwrap()
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetch_and_merge_unifies_both_sources() {
        let api = MockApi::new(
            Some(vec![product("p1", "pending", 500.0, "2024-03-01T10:00:00Z")]),
            Some(vec![service("s1", "confirmed", 300.0, "2024-03-02T10:00:00Z")]),
        );
        let mut controller = OrdersController::new(api);

        let snapshot = controller.fetch_and_merge().await;

        assert_eq!(ids(&snapshot.merged), vec!["s1", "p1"]);
        assert_eq!(snapshot.merged[0].customer_name, "Client s1");
        assert_eq!(snapshot.merged[0].phone_number, "555");
        assert_eq!(snapshot.merged[0].kind, OrderKind::Service);
        assert!(matches!(snapshot.product_source, SourceStatus::Loaded));
        assert!(matches!(snapshot.service_source, SourceStatus::Loaded));

        let now = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let stats = controller.compute_stats(StatsScope::All, &now);
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue, 800.0);
    }

    #[tokio::test]
    async fn test_failed_source_degrades_to_empty() {
        let api = MockApi::new(
            None,
            Some(vec![
                service("s1", "pending", 10.0, "2024-03-01T10:00:00Z"),
                service("s2", "pending", 10.0, "2024-03-05T10:00:00Z"),
                service("s3", "pending", 10.0, "2024-03-03T10:00:00Z"),
            ]),
        );
        let mut controller = OrdersController::new(api);

        let snapshot = controller.fetch_and_merge().await;

        assert_eq!(ids(&snapshot.merged), vec!["s2", "s3", "s1"]);
        assert!(snapshot.product_orders.is_empty());
        assert!(snapshot.product_source.is_failed());
        assert!(!snapshot.is_total_failure());
    }

    #[tokio::test]
    async fn test_total_failure_is_reported() {
        let mut controller = OrdersController::new(MockApi::new(None, None));

        let snapshot = controller.fetch_and_merge().await;

        assert!(snapshot.is_empty());
        assert!(snapshot.is_total_failure());
    }

    #[tokio::test]
    async fn test_update_status_patches_only_target() {
        let api = MockApi::new(
            Some(vec![
                product("ord-1", "processing", 100.0, "2024-03-01T10:00:00Z"),
                product("ord-2", "processing", 100.0, "2024-03-02T10:00:00Z"),
            ]),
            Some(vec![service("ord-1", "confirmed", 50.0, "2024-03-03T10:00:00Z")]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;

        controller
            .update_status("ord-1", OrderKind::Product, "shipped")
            .await
            .unwrap();

        let snapshot = controller.snapshot();
        let shipped: Vec<&Order> = snapshot
            .merged
            .iter()
            .filter(|o| o.status == "shipped")
            .collect();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].id, "ord-1");
        assert_eq!(shipped[0].kind, OrderKind::Product);
        assert_eq!(
            snapshot.find("ord-1", OrderKind::Product).unwrap().status,
            "shipped"
        );
        assert_eq!(
            snapshot.find("ord-2", OrderKind::Product).unwrap().status,
            "processing"
        );
        // услуга с тем же id не затронута
        assert_eq!(
            snapshot.find("ord-1", OrderKind::Service).unwrap().status,
            "confirmed"
        );
        assert_eq!(controller.api().calls(), vec!["orders/ord-1/status=shipped"]);
    }

    #[tokio::test]
    async fn test_invalid_status_is_not_sent() {
        let api = MockApi::new(
            Some(vec![]),
            Some(vec![service("s1", "pending", 50.0, "2024-03-03T10:00:00Z")]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;

        let err = controller
            .update_status("s1", OrderKind::Service, "shipped")
            .await
            .unwrap_err();
        assert!(matches!(err, OrdersError::InvalidStatus { kind: OrderKind::Service, .. }));

        let err = controller
            .update_payment_status("s1", OrderKind::Product, "verified")
            .await
            .unwrap_err();
        assert!(matches!(err, OrdersError::InvalidPaymentStatus { .. }));

        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_orders_without_id_cannot_be_mutated() {
        let mut anonymous = product("", "pending", 10.0, "2024-03-01T10:00:00Z");
        anonymous.mongo_id = None;
        let api = MockApi::new(
            Some(vec![
                anonymous.clone(),
                ProductOrderDto {
                    total_amount: Some(json!(20)),
                    ..anonymous
                },
                product("p1", "pending", 30.0, "2024-03-03T10:00:00Z"),
            ]),
            Some(vec![]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;
        assert_eq!(ids(&controller.snapshot().merged), vec!["p1", "", ""]);

        let err = controller
            .update_status("", OrderKind::Product, "shipped")
            .await
            .unwrap_err();
        assert!(matches!(err, OrdersError::MissingId(OrderKind::Product)));
        assert!(matches!(
            controller
                .update_payment_status(" ", OrderKind::Product, "paid")
                .await,
            Err(OrdersError::MissingId(_))
        ));
        assert!(matches!(
            controller.refresh_order("", OrderKind::Product).await,
            Err(OrdersError::MissingId(_))
        ));

        assert!(controller.api().calls().is_empty());
        let snapshot = controller.snapshot();
        assert!(snapshot.merged.iter().all(|o| o.status == "pending"));
        assert!(snapshot.merged.iter().all(|o| o.payment_status == "pending"));
    }

    #[tokio::test]
    async fn test_rejected_mutation_leaves_state_unchanged() {
        let api = MockApi {
            reject_mutations: true,
            ..MockApi::new(
                Some(vec![product("p1", "pending", 100.0, "2024-03-01T10:00:00Z")]),
                Some(vec![]),
            )
        };
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;
        let before = controller.snapshot().merged.clone();

        let err = controller
            .update_payment_status("p1", OrderKind::Product, "paid")
            .await
            .unwrap_err();

        assert!(matches!(err, OrdersError::Api(ApiError::Rejected(_))));
        assert_eq!(controller.snapshot().merged, before);
        assert_eq!(controller.api().calls(), vec!["orders/p1/payment=paid"]);
    }

    #[tokio::test]
    async fn test_service_payment_verified() {
        let api = MockApi::new(
            Some(vec![]),
            Some(vec![service("s1", "confirmed", 50.0, "2024-03-03T10:00:00Z")]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;

        controller
            .update_payment_status("s1", OrderKind::Service, "verified")
            .await
            .unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.service_orders[0].payment_status, "verified");
        assert_eq!(snapshot.merged[0].payment_status, "verified");
    }

    #[tokio::test]
    async fn test_stats_follow_patched_state() {
        let api = MockApi::new(
            Some(vec![
                product("p1", "pending", 100.0, "2024-03-01T10:00:00Z"),
                product("p2", "pending", 100.0, "2024-03-02T10:00:00Z"),
            ]),
            Some(vec![]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;
        let now = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        assert_eq!(controller.compute_stats(StatsScope::Products, &now).pending_orders, 2);

        controller
            .update_status("p1", OrderKind::Product, "delivered")
            .await
            .unwrap();

        let stats = controller.compute_stats(StatsScope::Products, &now);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(controller.compute_stats(StatsScope::Services, &now).total_orders, 0);
    }

    #[tokio::test]
    async fn test_refresh_order_reconciles_after_failure() {
        let api = MockApi {
            reject_mutations: true,
            ..MockApi::new(
                Some(vec![]),
                Some(vec![
                    service("s1", "pending", 50.0, "2024-03-01T10:00:00Z"),
                    service("s2", "pending", 50.0, "2024-03-02T10:00:00Z"),
                ]),
            )
        };
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;

        assert!(controller
            .update_status("s1", OrderKind::Service, "completed")
            .await
            .is_err());

        // бэкенд все же применил изменение
        if let Some(services) = controller.api().services.lock().unwrap().as_mut() {
            services[0].status = Some("completed".into());
        }

        controller.refresh_order("s1", OrderKind::Service).await.unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.find("s1", OrderKind::Service).unwrap().status, "completed");
        assert_eq!(ids(&snapshot.merged), vec!["s2", "s1"]);
        assert_eq!(snapshot.merged.len(), 2);

        let err = controller
            .refresh_order("missing", OrderKind::Service)
            .await
            .unwrap_err();
        assert!(matches!(err, OrdersError::Api(ApiError::Http { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_patch_after_reload_without_target_is_noop() {
        let api = MockApi::new(
            Some(vec![product("p1", "pending", 100.0, "2024-03-01T10:00:00Z")]),
            Some(vec![]),
        );
        let mut controller = OrdersController::new(api);
        controller.fetch_and_merge().await;

        // заказ удалили на бэкенде и список перезагрузили
        *controller.api().products.lock().unwrap() = Some(vec![]);
        controller.fetch_and_merge().await;

        controller
            .update_status("p1", OrderKind::Product, "cancelled")
            .await
            .unwrap();
        assert!(controller.snapshot().is_empty());
    }
}
