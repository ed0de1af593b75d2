//! MCP NAS module providing SSH-backed administration tools.
//!
//! This module is organized into the following submodules:
//!
//! - `config`: NAS credentials and timeouts from environment variables
//! - `error`: SSH failure classification
//! - `types`: Serializable result types
//! - `transport`: Remote session traits the connection layer is written against
//! - `client`: russh-backed connector and session
//! - `connection`: Lazily connected, health-checked single session
//! - `executor`: Command execution returning structured results
//! - `format`: Rendering of results as tool text
//! - `operations`: Command builders and runners for each NAS operation
//! - `tools`: MCP tool implementations
//! - `catalog`: Direct-call tool catalog for other tool-calling frameworks

pub(crate) mod auth;
pub mod catalog;
pub(crate) mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod format;
pub mod operations;
pub(crate) mod schema;
pub(crate) mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod tools;
pub mod transport;
pub mod types;

pub use catalog::{CatalogError, ToolCatalog, ToolDef};
pub use client::RusshConnector;
pub use config::NasConfig;
pub use executor::CommandExecutor;
pub use tools::McpNasTools;
pub use types::{ExecutionResult, FileExistsResponse, StatusResponse};
