use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Статусы заказа товара
pub const PRODUCT_ORDER_STATUSES: &[&str] =
    &["pending", "processing", "shipped", "delivered", "cancelled"];

/// Статусы оплаты заказа товара
pub const PRODUCT_PAYMENT_STATUSES: &[&str] = &["pending", "paid", "failed"];

/// Заказ товара в том виде, как его отдает `GET /orders`.
///
/// Все поля приходят как `serde_json::Value`: бэкенд не гарантирует типы
/// (числовой `transactionId`, суммы строкой), поэтому одна кривая запись
/// не должна ломать разбор всего списка. Приведение делает нормализация.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductOrderDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub customer_name: Option<Value>,
    #[serde(default)]
    pub phone_number: Option<Value>,
    #[serde(default)]
    pub product_name: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub payment_method: Option<Value>,
    #[serde(default)]
    pub transaction_id: Option<Value>,
    #[serde(default)]
    pub total_amount: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub payment_status: Option<Value>,
    #[serde(default)]
    pub order_date: Option<Value>,
    #[serde(default)]
    pub created_at: Option<Value>,
}
