pub mod http_client;
pub mod types;

pub use http_client::HttpOrdersApi;
pub use types::*;
