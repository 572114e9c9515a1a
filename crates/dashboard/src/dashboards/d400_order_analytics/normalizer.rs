//! Приведение сырых записей `/orders` и `/buyservices` к единому [`Order`].
//!
//! Нормализация никогда не падает: отсутствующие или битые поля
//! заменяются значениями по умолчанию.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use contracts::domain::a001_product_order::ProductOrderDto;
use contracts::domain::a002_service_order::ServiceOrderDto;
use contracts::domain::common::{Order, OrderKind, STATUS_PENDING};
use serde_json::Value;

/// Сырая запись заказа с тегом вида
#[derive(Debug, Clone)]
pub enum RawOrder {
    Product(ProductOrderDto),
    Service(ServiceOrderDto),
}

impl RawOrder {
    pub fn kind(&self) -> OrderKind {
        match self {
            RawOrder::Product(_) => OrderKind::Product,
            RawOrder::Service(_) => OrderKind::Service,
        }
    }
}

/// Нормализовать запись любого вида
pub fn normalize(raw: RawOrder) -> Order {
    match raw {
        RawOrder::Product(dto) => normalize_product(dto),
        RawOrder::Service(dto) => normalize_service(dto),
    }
}

pub fn normalize_product(dto: ProductOrderDto) -> Order {
    Order {
        id: pick_id(dto.mongo_id.as_ref(), dto.id.as_ref()),
        kind: OrderKind::Product,
        customer_name: value_text(dto.customer_name.as_ref()).unwrap_or_default(),
        phone_number: value_text(dto.phone_number.as_ref()).unwrap_or_default(),
        item_name: value_text(dto.product_name.as_ref()).unwrap_or_default(),
        item_category: value_text(dto.category.as_ref()),
        payment_method: value_text(dto.payment_method.as_ref()),
        transaction_id: value_text(dto.transaction_id.as_ref()),
        total_amount: amount(dto.total_amount.as_ref()),
        quantity: quantity(dto.quantity.as_ref()),
        status: value_text(dto.status.as_ref())
            .unwrap_or_else(|| STATUS_PENDING.to_string()),
        payment_status: value_text(dto.payment_status.as_ref())
            .unwrap_or_else(|| STATUS_PENDING.to_string()),
        order_date: order_date(dto.order_date.as_ref(), dto.created_at.as_ref()),
    }
}

/// Услуги хранят клиента в `name`/`phone`, а название в `serviceName`;
/// канонические поля имеют приоритет, если заполнены
pub fn normalize_service(dto: ServiceOrderDto) -> Order {
    Order {
        id: pick_id(dto.mongo_id.as_ref(), dto.id.as_ref()),
        kind: OrderKind::Service,
        customer_name: value_text(dto.customer_name.as_ref())
            .or_else(|| value_text(dto.name.as_ref()))
            .unwrap_or_default(),
        phone_number: value_text(dto.phone_number.as_ref())
            .or_else(|| value_text(dto.phone.as_ref()))
            .unwrap_or_default(),
        item_name: value_text(dto.product_name.as_ref())
            .or_else(|| value_text(dto.service_name.as_ref()))
            .unwrap_or_default(),
        item_category: value_text(dto.service_category.as_ref()),
        payment_method: value_text(dto.payment_method.as_ref()),
        transaction_id: value_text(dto.transaction_id.as_ref()),
        total_amount: amount(dto.total_amount.as_ref()),
        quantity: quantity(dto.quantity.as_ref()),
        status: value_text(dto.status.as_ref())
            .unwrap_or_else(|| STATUS_PENDING.to_string()),
        payment_status: value_text(dto.payment_status.as_ref())
            .unwrap_or_else(|| STATUS_PENDING.to_string()),
        order_date: order_date(dto.order_date.as_ref(), dto.created_at.as_ref()),
    }
}

pub fn normalize_product_orders(dtos: Vec<ProductOrderDto>) -> Vec<Order> {
    dtos.into_iter().map(normalize_product).collect()
}

pub fn normalize_service_orders(dtos: Vec<ServiceOrderDto>) -> Vec<Order> {
    dtos.into_iter().map(normalize_service).collect()
}

fn pick_id(mongo_id: Option<&Value>, id: Option<&Value>) -> String {
    value_text(mongo_id)
        .or_else(|| value_text(id))
        .unwrap_or_default()
}

/// Строка или число как текст; пустая строка считается отсутствующим значением
fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Число или числовая строка, иначе `None`
fn value_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn amount(value: Option<&Value>) -> f64 {
    value_number(value).filter(|n| *n >= 0.0).unwrap_or(0.0)
}

fn quantity(value: Option<&Value>) -> f64 {
    value_number(value).filter(|n| *n > 0.0).unwrap_or(1.0)
}

/// `orderDate`, затем `createdAt`; без даты заказ уходит в начало эпохи
fn order_date(primary: Option<&Value>, created_at: Option<&Value>) -> DateTime<Utc> {
    value_timestamp(primary)
        .or_else(|| value_timestamp(created_at))
        .unwrap_or_else(|| {
            tracing::debug!("Order without parseable date, using epoch");
            DateTime::<Utc>::default()
        })
}

fn value_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_timestamp(s.trim()),
        // миллисекунды с начала эпохи
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Разбор даты: RFC 3339, либо локальный формат без зоны (считается UTC)
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
