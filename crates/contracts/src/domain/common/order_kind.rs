use serde::{Deserialize, Serialize};

use crate::domain::a001_product_order::{PRODUCT_ORDER_STATUSES, PRODUCT_PAYMENT_STATUSES};
use crate::domain::a002_service_order::{SERVICE_ORDER_STATUSES, SERVICE_PAYMENT_STATUSES};

/// Вид заказа. Определяет ресурс бэкенда и допустимые словари статусов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    /// Заказ товара (`/orders`)
    Product,
    /// Заказ услуги (`/buyservices`)
    Service,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Product => "product",
            OrderKind::Service => "service",
        }
    }

    /// Статусы, которые можно выставить заказу этого вида
    pub fn allowed_statuses(&self) -> &'static [&'static str] {
        match self {
            OrderKind::Product => PRODUCT_ORDER_STATUSES,
            OrderKind::Service => SERVICE_ORDER_STATUSES,
        }
    }

    /// Статусы оплаты, которые можно выставить заказу этого вида
    pub fn allowed_payment_statuses(&self) -> &'static [&'static str] {
        match self {
            OrderKind::Product => PRODUCT_PAYMENT_STATUSES,
            OrderKind::Service => SERVICE_PAYMENT_STATUSES,
        }
    }

    pub fn is_valid_status(&self, value: &str) -> bool {
        self.allowed_statuses().contains(&value)
    }

    pub fn is_valid_payment_status(&self, value: &str) -> bool {
        self.allowed_payment_statuses().contains(&value)
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
