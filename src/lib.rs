//! # SafeNote-RS
//!
//! API server for SAFE note and term sheet workflows between entrepreneur
//! and angel companies.
//!
//! Every company-scoped route declares which roles (owner, team member,
//! SAFE recipient, term sheet recipient) and which team member permission
//! tiers (`View < Edit < Create`) it accepts. [`auth::access::AccessEvaluator`]
//! decides each request from the caller's membership rows.
//!
//! ## Running the server
//!
//! ```rust,no_run
//! use safenote_rs::{Config, server::ServerBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/safenote.yaml").await?;
//!     let server = ServerBuilder::new().with_config(config).build().await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Evaluating access directly
//!
//! ```rust,no_run
//! use safenote_rs::auth::access::AccessEvaluator;
//! use safenote_rs::core::models::{Permission, Role};
//! use safenote_rs::storage::StorageLayer;
//! use uuid::Uuid;
//!
//! # async fn example(company_id: Uuid, user_id: Uuid) -> safenote_rs::Result<()> {
//! let storage = StorageLayer::in_memory();
//! let evaluator = AccessEvaluator::new(storage.lookup());
//! let allowed = evaluator
//!     .evaluate(
//!         Some(company_id),
//!         user_id,
//!         &[Role::Owner, Role::TeamMember],
//!         &[Permission::View, Permission::Edit],
//!     )
//!     .await?;
//! # let _ = allowed;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Server build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (seconds since the epoch)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information captured by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
