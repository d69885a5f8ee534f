//! Client library for SysML v2 model repository services
//!
//! Exposes typed operations over projects, commits, branches, tags,
//! elements and relationships. Each operation is a thin wrapper around a
//! single request executor, so every endpoint shares the same error
//! classification. Responses are passed through as [`serde_json::Value`]
//! without further interpretation.
//!
//! ```no_run
//! use sysmlv2_client::{ClientConfig, SysmlApi};
//!
//! # fn main() -> sysmlv2_client::Result<()> {
//! let config = ClientConfig::new("http://localhost:8083", "Bearer my-token");
//! let api = SysmlApi::new(config)?;
//!
//! for project in api.get_projects()? {
//!     println!("{project}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use api::SysmlApi;
pub use config::{ClientConfig, RelationDirection};
pub use error::{ClientError, Result};
