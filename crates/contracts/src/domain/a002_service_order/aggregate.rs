use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Статусы заказа услуги.
/// `shipped`/`delivered` намеренно не допускаются, хотя старая форма услуг
/// предлагала `delivered`: терминальный успешный статус услуги `completed`.
/// Уже сохраненный `delivered` при этом считается завершенным заказом.
pub const SERVICE_ORDER_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "processing",
    "in-progress",
    "completed",
    "cancelled",
];

/// Статусы оплаты заказа услуги (`verified` есть только у услуг)
pub const SERVICE_PAYMENT_STATUSES: &[&str] = &["pending", "paid", "verified", "failed"];

/// Заказ услуги в том виде, как его отдает `GET /buyservices`.
///
/// Форма старой формы заказа: `name`/`phone`/`serviceName` вместо
/// `customerName`/`phoneNumber`/`productName`. Новые записи могут нести оба варианта.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOrderDto {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub mongo_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub customer_name: Option<Value>,
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub phone_number: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub product_name: Option<Value>,
    #[serde(default)]
    pub service_name: Option<Value>,
    #[serde(default)]
    pub service_category: Option<Value>,
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
