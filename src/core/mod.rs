//! Core domain for the SAFE note platform
//!
//! Companies, their memberships and the documents they exchange.

pub mod models;
