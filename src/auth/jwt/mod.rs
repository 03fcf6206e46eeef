//! JWT token handling
//!
//! This module provides JWT token creation and verification.

mod handler;
pub mod types;

pub use types::{Claims, JwtHandler, TokenPair, TokenType};
