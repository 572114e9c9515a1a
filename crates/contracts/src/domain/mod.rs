pub mod a001_product_order;
pub mod a002_service_order;
pub mod common;
