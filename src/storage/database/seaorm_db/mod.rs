// Module declarations
mod types;
mod connection;
mod user_ops;
mod company_ops;
mod member_ops;
mod document_ops;
mod store_impl;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
