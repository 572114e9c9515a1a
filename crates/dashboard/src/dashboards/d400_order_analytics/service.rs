use chrono::{DateTime, Datelike, TimeZone};
use contracts::dashboards::d400_order_analytics::{
    MonthlyTrend, StatsSummary, TopItem, TOP_ITEMS_LIMIT, TREND_MONTHS,
};
use contracts::domain::common::Order;
use std::collections::HashMap;

/// Ключ распределения для заказов без способа оплаты
const UNKNOWN_PAYMENT_METHOD: &str = "unknown";

/// Посчитать сводную статистику по списку заказов.
///
/// Границы "сегодня", "этот месяц" и месяцев тренда берутся в часовом поясе `now`.
/// Пустой список дает нулевую сводку с шестью пустыми месяцами.
pub fn compute_stats<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> StatsSummary {
    let tz = now.timezone();
    let today = now.date_naive();
    let (year, month) = (today.year(), today.month());

    let mut summary = StatsSummary {
        total_orders: orders.len(),
        monthly_trends: trailing_months(year, month),
        ..Default::default()
    };

    for order in orders {
        let local = order.order_date.with_timezone(&tz).date_naive();

        summary.total_revenue += order.total_amount;

        if order.is_pending() {
            summary.pending_orders += 1;
        }
        if order.is_completed() {
            summary.completed_orders += 1;
        }
        if local == today {
            summary.today_orders += 1;
        }
        if local.year() == year && local.month() == month {
            summary.month_revenue += order.total_amount;
        }

        *summary
            .status_distribution
            .entry(order.status.clone())
            .or_insert(0) += 1;

        let method = order
            .payment_method
            .clone()
            .unwrap_or_else(|| UNKNOWN_PAYMENT_METHOD.to_string());
        *summary.payment_method_distribution.entry(method).or_insert(0) += 1;

        if let Some(bucket) = summary
            .monthly_trends
            .iter_mut()
            .find(|t| t.year == local.year() && t.month == local.month())
        {
            bucket.orders += 1;
            bucket.revenue += order.total_amount;
        }
    }

    summary.top_products = top_items(orders, TOP_ITEMS_LIMIT);
    summary
}

/// Рейтинг позиций по суммарному количеству.
/// При равенстве выше та позиция, что встретилась раньше.
pub fn top_items(orders: &[Order], limit: usize) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for order in orders {
        let slot = *index.entry(order.item_name.as_str()).or_insert_with(|| {
            items.push(TopItem {
                item_name: order.item_name.clone(),
                quantity: 0.0,
                revenue: 0.0,
            });
            items.len() - 1
        });
        items[slot].quantity += order.quantity;
        items[slot].revenue += order.total_amount;
    }

    // sort_by стабилен
    items.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
    items.truncate(limit);
    items
}

/// [`TREND_MONTHS`] пустых календарных месяцев, заканчивая текущим
fn trailing_months(year: i32, month: u32) -> Vec<MonthlyTrend> {
    (0..TREND_MONTHS as i32)
        .rev()
        .map(|back| {
            let (y, m) = shift_month(year, month, back);
            MonthlyTrend::empty(y, m)
        })
        .collect()
}

/// Сдвинуть месяц назад на `back` месяцев
fn shift_month(year: i32, month: u32, back: i32) -> (i32, u32) {
    let absolute = year * 12 + month as i32 - 1 - back;
    (absolute.div_euclid(12), absolute.rem_euclid(12) as u32 + 1)
}
