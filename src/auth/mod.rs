//! Authentication and authorization
//!
//! Authentication issues and verifies JWTs for registered users; authorization
//! of company-scoped requests lives in [`access`].

pub mod access;
pub mod jwt;
pub mod password;
mod system;
pub mod types;

#[cfg(test)]
mod tests;

pub use system::AuthSystem;
pub use types::{AuthMethod, AuthSession, AuthenticatedUser};
