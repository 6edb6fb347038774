//! Mediaclip MCP Common Library
//!
//! Shared infrastructure for the mediaclip MCP server: configuration,
//! error handling, transport selection, server lifecycle, and tracing
//! initialization.

pub mod config;
pub mod error;
pub mod server;
pub mod tracing;
pub mod transport;


pub use config::Config;
pub use error::{ConfigError, Error, Result};
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
