//! User operations.
//!
//! `UsersOp` describes each call as data; nothing happens until the
//! descriptor is handed to [`interpret`] with a transport and a config.

use compact_str::{CompactString, format_compact};
use reqwest::Method;

use crate::client::{ApiResponse, Config, Pagination, Result, Transport};
use crate::domain::User;

/// A user API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsersOp {
    /// Fetch a single user by login
    Get { username: CompactString },

    /// Fetch the authenticated user
    GetAuthenticated,

    /// List users, optionally starting after a user id
    List {
        since: Option<u64>,
        pagination: Option<Pagination>,
    },
}

/// Response to a [`UsersOp`]
#[derive(Debug, Clone, PartialEq)]
pub enum UsersResponse {
    User(User),
    Users(Vec<User>),
}

/// Execute one user operation against the API
pub async fn interpret(
    transport: &Transport,
    config: &Config,
    op: UsersOp,
) -> Result<ApiResponse<UsersResponse>> {
    match op {
        UsersOp::Get { username } => Ok(get(transport, config, &username)
            .await?
            .map(UsersResponse::User)),
        UsersOp::GetAuthenticated => Ok(get_authenticated(transport, config)
            .await?
            .map(UsersResponse::User)),
        UsersOp::List { since, pagination } => Ok(list(transport, config, since, pagination)
            .await?
            .map(UsersResponse::Users)),
    }
}

/// GET `users/{username}`
pub async fn get(transport: &Transport, config: &Config, username: &str) -> Result<ApiResponse<User>> {
    transport
        .execute(
            Method::GET,
            &format_compact!("users/{username}"),
            config,
            &[],
            None,
            None,
        )
        .await
}

/// GET `user`
pub async fn get_authenticated(transport: &Transport, config: &Config) -> Result<ApiResponse<User>> {
    transport
        .execute(Method::GET, "user", config, &[], None, None)
        .await
}

/// GET `users`, with `since` as a query parameter when present
pub async fn list(
    transport: &Transport,
    config: &Config,
    since: Option<u64>,
    pagination: Option<Pagination>,
) -> Result<ApiResponse<Vec<User>>> {
    let mut query: Vec<(&str, CompactString)> = Vec::new();
    if let Some(since) = since {
        query.push(("since", since.to_string().into()));
    }

    transport
        .execute(Method::GET, "users", config, &query, pagination, None)
        .await
}
