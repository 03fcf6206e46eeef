//! Integration tests for safenote-rs
//!
//! These tests run against real storage backends without mocking.

pub mod access_tests;
pub mod config_tests;
pub mod database_tests;
pub mod http_flow_tests;
