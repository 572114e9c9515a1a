//! Единый список заказов товаров и услуг и статистика по нему

pub mod controller;
pub mod error;
pub mod merger;
pub mod normalizer;
pub mod service;

#[cfg(test)]
pub(crate) mod fixtures;

pub use controller::{OrdersController, OrdersSnapshot, SourceStatus, StatsScope};
pub use error::OrdersError;
pub use merger::merge_orders;
pub use normalizer::{normalize, RawOrder};
pub use service::compute_stats;
