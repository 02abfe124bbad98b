//! Activity operations: notification subscriptions and stars.
//!
//! Star endpoints have a timeline variant: overriding `Accept` with the star
//! media type makes the API include `starred_at` timestamps, which changes
//! the response shape. The override rides on the per-call [`Config`] header
//! merge, the same mechanism callers use for any other media type.

use compact_str::{CompactString, format_compact};
use reqwest::Method;
use serde_json::json;

use crate::client::{ApiResponse, Config, Pagination, Result, Transport};
use crate::domain::{Stargazer, StarredRepository, Subscription};

use super::pull_requests::SortDirection;

/// Media type that adds `starred_at` timestamps to star responses
pub const STAR_ACCEPT: &str = "application/vnd.github.v3.star+json";

/// Allowed values for the starred-repositories `sort` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarredSort {
    Created,
    Updated,
}

impl StarredSort {
    fn as_api_str(self) -> &'static str {
        match self {
            StarredSort::Created => "created",
            StarredSort::Updated => "updated",
        }
    }
}

/// An activity API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityOp {
    /// Subscribe to or ignore a notification thread
    SetThreadSubscription {
        id: u64,
        subscribed: bool,
        ignored: bool,
    },

    /// List the stargazers of a repository
    ListStargazers {
        owner: CompactString,
        repo: CompactString,
        timeline: bool,
        pagination: Option<Pagination>,
    },

    /// List the repositories starred by a user
    ListStarredRepositories {
        username: CompactString,
        timeline: bool,
        sort: Option<StarredSort>,
        direction: Option<SortDirection>,
        pagination: Option<Pagination>,
    },
}

/// Response to an [`ActivityOp`]
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityResponse {
    Subscription(Subscription),
    Stargazers(Vec<Stargazer>),
    StarredRepositories(Vec<StarredRepository>),
}

/// Execute one activity operation against the API
pub async fn interpret(
    transport: &Transport,
    config: &Config,
    op: ActivityOp,
) -> Result<ApiResponse<ActivityResponse>> {
    match op {
        ActivityOp::SetThreadSubscription { id, subscribed, ignored } => {
            Ok(set_thread_subscription(transport, config, id, subscribed, ignored)
                .await?
                .map(ActivityResponse::Subscription))
        }
        ActivityOp::ListStargazers { owner, repo, timeline, pagination } => {
            Ok(list_stargazers(transport, config, &owner, &repo, timeline, pagination)
                .await?
                .map(ActivityResponse::Stargazers))
        }
        ActivityOp::ListStarredRepositories {
            username,
            timeline,
            sort,
            direction,
            pagination,
        } => Ok(list_starred_repositories(
            transport, config, &username, timeline, sort, direction, pagination,
        )
        .await?
        .map(ActivityResponse::StarredRepositories)),
    }
}

/// PUT `notifications/threads/{id}/subscription`
pub async fn set_thread_subscription(
    transport: &Transport,
    config: &Config,
    id: u64,
    subscribed: bool,
    ignored: bool,
) -> Result<ApiResponse<Subscription>> {
    transport
        .execute(
            Method::PUT,
            &format_compact!("notifications/threads/{id}/subscription"),
            config,
            &[],
            None,
            Some(json!({ "subscribed": subscribed, "ignored": ignored })),
        )
        .await
}

/// GET `repos/{owner}/{repo}/stargazers`
pub async fn list_stargazers(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    timeline: bool,
    pagination: Option<Pagination>,
) -> Result<ApiResponse<Vec<Stargazer>>> {
    let config = timeline_config(config, timeline);

    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/stargazers"),
            &config,
            &[],
            pagination,
            None,
        )
        .await
}

/// GET `users/{username}/starred`
pub async fn list_starred_repositories(
    transport: &Transport,
    config: &Config,
    username: &str,
    timeline: bool,
    sort: Option<StarredSort>,
    direction: Option<SortDirection>,
    pagination: Option<Pagination>,
) -> Result<ApiResponse<Vec<StarredRepository>>> {
    let config = timeline_config(config, timeline);

    let mut query: Vec<(&str, CompactString)> = Vec::new();
    if let Some(sort) = sort {
        query.push(("sort", sort.as_api_str().into()));
    }
    if let Some(direction) = direction {
        query.push(("direction", direction.as_api_str().into()));
    }

    transport
        .execute(
            Method::GET,
            &format_compact!("users/{username}/starred"),
            &config,
            &query,
            pagination,
            None,
        )
        .await
}

/// With `timeline`, override `Accept` with the star media type; the caller's
/// config is otherwise passed through untouched.
fn timeline_config(config: &Config, timeline: bool) -> Config {
    let mut config = config.clone();
    if timeline {
        config.headers.insert("Accept".into(), STAR_ACCEPT.into());
    }
    config
}
