use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::OrderKind;

/// Обертка ответа бэкенда: `{ success, data, message }`.
/// Часть эндпоинтов отдает данные без обертки, см. [`decode_list`] и [`decode_item`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Тело `PATCH .../status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Тело `PATCH .../payment`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusUpdate {
    pub payment_status: String,
}

/// Ответ на изменение статуса или оплаты
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MutationAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationAck {
    /// Принял ли бэкенд изменение.
    ///
    /// `/orders` подтверждает только через `success: true`,
    /// `/buyservices` также через непустое `data`.
    pub fn is_accepted(&self, kind: OrderKind) -> bool {
        let success = self.success == Some(true);
        match kind {
            OrderKind::Product => success,
            OrderKind::Service => success || self.data.as_ref().is_some_and(is_truthy),
        }
    }
}

/// Truthiness значения JSON в понимании фронтенда
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Разбор ответа списка: голый массив или `{ success, data: [...] }`.
///
/// Элементы разбираются по одному: запись, которая не разбирается в `T`
/// (например, не объект), пропускается и не роняет весь список.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, String> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(_) => {
            let envelope: ResponseEnvelope<Value> = serde_json::from_value(body)
                .map_err(|e| format!("Invalid list envelope: {}", e))?;
            if envelope.success == Some(false) {
                return Err(envelope
                    .message
                    .unwrap_or_else(|| "Backend reported success: false".to_string()));
            }
            match envelope.data {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items,
                Some(other) => return Err(format!("Envelope data is not a list: {}", other)),
            }
        }
        other => return Err(format!("Unexpected list payload: {}", other)),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Разбор ответа по одной записи: голый объект или `{ success, data: {...} }`
pub fn decode_item<T: DeserializeOwned>(body: Value) -> Result<T, String> {
    let wrapped = body
        .as_object()
        .is_some_and(|obj| obj.contains_key("data") || obj.contains_key("success"));

    if !wrapped {
        return serde_json::from_value(body).map_err(|e| format!("Invalid item payload: {}", e));
    }

    let envelope: ResponseEnvelope<T> =
        serde_json::from_value(body).map_err(|e| format!("Invalid item envelope: {}", e))?;
    if envelope.success == Some(false) {
        return Err(envelope
            .message
            .unwrap_or_else(|| "Backend reported success: false".to_string()));
    }
    envelope
        .data
        .ok_or_else(|| "Envelope has no data".to_string())
}
