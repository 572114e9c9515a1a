use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OrderKind;

/// Значение статуса "ожидает"
pub const STATUS_PENDING: &str = "pending";

/// Терминальные успешные статусы: `delivered` у товаров, `completed` у услуг
pub const COMPLETED_STATUSES: &[&str] = &["delivered", "completed"];

/// Нормализованный заказ (товар или услуга) в едином формате.
///
/// Все поля, которые отображение читает без проверок, уже заполнены
/// значениями по умолчанию при нормализации.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Идентификатор, выданный бэкендом
    pub id: String,
    /// Вид заказа, не меняется после нормализации
    pub kind: OrderKind,
    pub customer_name: String,
    pub phone_number: String,
    /// Название товара или услуги
    pub item_name: String,
    /// Категория (обычно только у услуг)
    pub item_category: Option<String>,
    /// Способ оплаты ("cod", "bkash", "card", ...)
    pub payment_method: Option<String>,
    /// ID транзакции при электронной оплате
    pub transaction_id: Option<String>,
    /// Сумма заказа, 0 если не указана
    pub total_amount: f64,
    /// Количество, 1 если не указано
    pub quantity: f64,
    pub status: String,
    pub payment_status: String,
    /// Дата заказа, единственный ключ сортировки
    pub order_date: DateTime<Utc>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.status == STATUS_PENDING
    }

    /// Заказ в терминальном успешном статусе
    pub fn is_completed(&self) -> bool {
        COMPLETED_STATUSES.contains(&self.status.as_str())
    }
}
