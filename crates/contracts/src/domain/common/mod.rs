//! Общие типы для заказов обоих видов

pub mod envelope;
pub mod order;
pub mod order_kind;

// Re-exports
pub use envelope::{
    decode_item, decode_list, MutationAck, PaymentStatusUpdate, ResponseEnvelope, StatusUpdate,
};
pub use order::{Order, COMPLETED_STATUSES, STATUS_PENDING};
pub use order_kind::OrderKind;
