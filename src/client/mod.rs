//! GitHub client modules
//!
//! This module provides the transport adapter and its supporting pieces,
//! split into focused components: per-call configuration, the error surface,
//! the HTTP transport, and a high-level typed service facade.

pub mod config;
pub mod error;
pub mod service;
pub mod transport;

// Re-export main types for convenience
pub use config::{Config, Pagination};
pub use error::ClientError;
pub use service::GithubService;
pub use transport::{ApiResponse, Transport};

pub type Result<T> = std::result::Result<T, ClientError>;
