//! Error types for the document store.

mod store_config_error;
mod store_error;

pub use store_config_error::StoreConfigError;
pub use store_error::StoreError;
