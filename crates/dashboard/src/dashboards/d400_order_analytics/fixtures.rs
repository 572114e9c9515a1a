use chrono::{DateTime, Utc};
use contracts::domain::common::{Order, OrderKind};

/// Минимальный нормализованный заказ для тестов
pub fn order(id: &str, kind: OrderKind, date: DateTime<Utc>) -> Order {
    Order {
        id: id.to_string(),
        kind,
        customer_name: String::new(),
        phone_number: String::new(),
        item_name: String::new(),
        item_category: None,
        payment_method: None,
        transaction_id: None,
        total_amount: 0.0,
        quantity: 1.0,
        status: "pending".to_string(),
        payment_status: "pending".to_string(),
        order_date: date,
    }
}
