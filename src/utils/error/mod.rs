//! Error handling for the server
//!
//! This module defines the crate-wide error type and its HTTP mapping.

#![allow(missing_docs)]

mod helpers;
mod response;
mod types;

pub use response::{ErrorDetail, ErrorResponse};
pub use types::{GatewayError, Result};
