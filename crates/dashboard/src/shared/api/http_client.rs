use async_trait::async_trait;
use contracts::domain::a001_product_order::ProductOrderDto;
use contracts::domain::a002_service_order::ServiceOrderDto;
use contracts::domain::common::{
    decode_item, decode_list, MutationAck, OrderKind, PaymentStatusUpdate, StatusUpdate,
};
use serde::Serialize;
use serde_json::Value;

use super::types::{ApiError, OrdersApi};
use crate::shared::config::ApiConfig;

/// Путь ресурса бэкенда для вида заказа
fn resource(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Product => "orders",
        OrderKind::Service => "buyservices",
    }
}

/// HTTP-клиент для ресурсов заказов
pub struct HttpOrdersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrdersApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: OrderKind) -> String {
        format!("{}/{}", self.base_url, resource(kind))
    }

    fn item_url(&self, kind: OrderKind, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            resource(kind),
            urlencoding::encode(id)
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::read_json(response).await
    }

    /// PATCH с JSON телом; операция считается выполненной только если
    /// бэкенд подтвердил ее по правилам своего ресурса
    async fn patch_field<B: Serialize + Sync>(
        &self,
        kind: OrderKind,
        id: &str,
        action: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.item_url(kind, id), action);
        tracing::debug!("PATCH {}", url);

        let response = self.client.patch(&url).json(body).send().await?;
        let value = Self::read_json(response).await?;
        let ack: MutationAck =
            serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))?;

        if ack.is_accepted(kind) {
            Ok(())
        } else {
            let reason = ack
                .message
                .unwrap_or_else(|| format!("{} {} was not acknowledged", action, id));
            tracing::error!("PATCH {} rejected: {}", url, reason);
            Err(ApiError::Rejected(reason))
        }
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Request failed with status {}: {}", status, body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            ApiError::Decode(format!("{}. Response: {}", e, preview))
        })
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    async fn list_product_orders(&self) -> Result<Vec<ProductOrderDto>, ApiError> {
        let body = self.get_json(&self.collection_url(OrderKind::Product)).await?;
        decode_list(body).map_err(ApiError::Rejected)
    }

    async fn list_service_orders(&self) -> Result<Vec<ServiceOrderDto>, ApiError> {
        let body = self.get_json(&self.collection_url(OrderKind::Service)).await?;
        decode_list(body).map_err(ApiError::Rejected)
    }

    async fn get_product_order(&self, id: &str) -> Result<ProductOrderDto, ApiError> {
        let body = self.get_json(&self.item_url(OrderKind::Product, id)).await?;
        decode_item(body).map_err(ApiError::Rejected)
    }

    async fn get_service_order(&self, id: &str) -> Result<ServiceOrderDto, ApiError> {
        let body = self.get_json(&self.item_url(OrderKind::Service, id)).await?;
        decode_item(body).map_err(ApiError::Rejected)
    }

    async fn update_product_status(&self, id: &str, status: &str) -> Result<(), ApiError> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        self.patch_field(OrderKind::Product, id, "status", &body).await
    }

    async fn update_product_payment(
        &self,
        id: &str,
        payment_status: &str,
    ) -> Result<(), ApiError> {
        let body = PaymentStatusUpdate {
            payment_status: payment_status.to_string(),
        };
        self.patch_field(OrderKind::Product, id, "payment", &body)
            .await
    }

    async fn update_service_status(&self, id: &str, status: &str) -> Result<(), ApiError> {
        let body = StatusUpdate {
            status: status.to_string(),
        };
        self.patch_field(OrderKind::Service, id, "status", &body).await
    }

    async fn update_service_payment(
        &self,
        id: &str,
        payment_status: &str,
    ) -> Result<(), ApiError> {
        let body = PaymentStatusUpdate {
            payment_status: payment_status.to_string(),
        };
        self.patch_field(OrderKind::Service, id, "payment", &body)
            .await
    }
}
