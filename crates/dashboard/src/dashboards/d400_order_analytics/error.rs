use contracts::domain::common::OrderKind;
use thiserror::Error;

use crate::shared::api::ApiError;

/// Ошибки операций над списком заказов.
/// Все восстановимые: локальное состояние при ошибке не меняется.
#[derive(Debug, Clone, Error)]
pub enum OrdersError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// У записи нет `_id`/`id`, адресовать ее на бэкенде нельзя
    #[error("{0} order has no id")]
    MissingId(OrderKind),

    #[error("Status '{value}' is not allowed for {kind} orders")]
    InvalidStatus { kind: OrderKind, value: String },

    #[error("Payment status '{value}' is not allowed for {kind} orders")]
    InvalidPaymentStatus { kind: OrderKind, value: String },
}
