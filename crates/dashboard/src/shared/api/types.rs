use async_trait::async_trait;
use contracts::domain::a001_product_order::ProductOrderDto;
use contracts::domain::a002_service_order::ServiceOrderDto;
use thiserror::Error;

/// Ошибки обращения к REST бэкенду
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Сеть недоступна, таймаут, обрыв соединения
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Бэкенд ответил 2xx, но не подтвердил операцию
    #[error("Request rejected by backend: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

/// REST ресурсы заказов (`/orders` и `/buyservices`).
///
/// Реализация по HTTP: [`super::HttpOrdersApi`].
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// `GET /orders`
    async fn list_product_orders(&self) -> Result<Vec<ProductOrderDto>, ApiError>;

    /// `GET /buyservices`
    async fn list_service_orders(&self) -> Result<Vec<ServiceOrderDto>, ApiError>;

    /// `GET /orders/{id}`
    async fn get_product_order(&self, id: &str) -> Result<ProductOrderDto, ApiError>;

    /// `GET /buyservices/{id}`
    async fn get_service_order(&self, id: &str) -> Result<ServiceOrderDto, ApiError>;

    /// `PATCH /orders/{id}/status`
    async fn update_product_status(&self, id: &str, status: &str) -> Result<(), ApiError>;

    /// `PATCH /orders/{id}/payment`
    async fn update_product_payment(&self, id: &str, payment_status: &str)
        -> Result<(), ApiError>;

    /// `PATCH /buyservices/{id}/status`
    async fn update_service_status(&self, id: &str, status: &str) -> Result<(), ApiError>;

    /// `PATCH /buyservices/{id}/payment`
    async fn update_service_payment(&self, id: &str, payment_status: &str)
        -> Result<(), ApiError>;
}
