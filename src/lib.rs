//! Typed GitHub REST API client with composable operations.
//!
//! Each API area (users, pull requests, activity) is a closed enum of
//! operation descriptors. A descriptor is plain data until it is interpreted
//! against a [`Transport`] with a [`Config`], producing a typed
//! [`ApiResponse`] or a [`ClientError`]. Descriptors from different areas can
//! be combined into one program via [`Operation`] and executed in order with
//! [`run_program`], which stops at the first error.
//!
//! For one-off calls, [`GithubService`] wraps a transport and a config behind
//! one method per operation.

pub mod client;
pub mod domain;
pub mod ops;

pub use client::{ApiResponse, ClientError, Config, GithubService, Pagination, Transport};
pub use ops::{Operation, OperationResponse, interpret, run_program};

pub type Result<T> = std::result::Result<T, ClientError>;
