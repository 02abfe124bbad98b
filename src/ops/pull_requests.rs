//! Pull request operations.
//!
//! List filters are modeled as a closed set of `(name, value)` producers.
//! `state`, `sort` and `direction` accept only the API's fixed vocabularies;
//! `head` and `base` are free-form branch references. The asymmetry is
//! deliberate: branch names are unbounded, the others are not.

use compact_str::{CompactString, format_compact};
use reqwest::Method;
use serde::Serialize;
use serde_json::json;

use crate::client::{ApiResponse, Config, Pagination, Result, Transport};
use crate::domain::{NewPullRequest, PullRequest, PullRequestFile, PullRequestReview};

/// Allowed values for the `state` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrFilterState {
    Open,
    Closed,
    All,
}

impl PrFilterState {
    fn as_api_str(self) -> &'static str {
        match self {
            PrFilterState::Open => "open",
            PrFilterState::Closed => "closed",
            PrFilterState::All => "all",
        }
    }
}

/// Allowed values for the `sort` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrFilterSort {
    Created,
    Updated,
    Popularity,
    LongRunning,
}

impl PrFilterSort {
    fn as_api_str(self) -> &'static str {
        match self {
            PrFilterSort::Created => "created",
            PrFilterSort::Updated => "updated",
            PrFilterSort::Popularity => "popularity",
            PrFilterSort::LongRunning => "long-running",
        }
    }
}

/// Allowed values for the `direction` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub(crate) fn as_api_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A named query-parameter constraint for pull request lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrFilter {
    State(PrFilterState),
    /// Free-form `user:ref-name` or `organization:ref-name`
    Head(CompactString),
    /// Free-form base branch name
    Base(CompactString),
    Sort(PrFilterSort),
    Direction(SortDirection),
}

impl PrFilter {
    /// The `(name, value)` query pair for this filter
    pub fn query_pair(&self) -> (&'static str, CompactString) {
        match self {
            PrFilter::State(state) => ("state", state.as_api_str().into()),
            PrFilter::Head(head) => ("head", head.clone()),
            PrFilter::Base(base) => ("base", base.clone()),
            PrFilter::Sort(sort) => ("sort", sort.as_api_str().into()),
            PrFilter::Direction(direction) => ("direction", direction.as_api_str().into()),
        }
    }
}

/// A pull request API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullRequestsOp {
    /// Fetch a single pull request
    Get {
        owner: CompactString,
        repo: CompactString,
        number: u64,
    },

    /// List pull requests, with filters flattened to query parameters
    List {
        owner: CompactString,
        repo: CompactString,
        filters: Vec<PrFilter>,
        pagination: Option<Pagination>,
    },

    /// List the files changed by a pull request
    ListFiles {
        owner: CompactString,
        repo: CompactString,
        number: u64,
        pagination: Option<Pagination>,
    },

    /// Open a pull request from a title/body pair or an existing issue.
    ///
    /// `maintainer_can_modify` defaults to `true` when absent, resolved at
    /// marshaling time.
    Create {
        owner: CompactString,
        repo: CompactString,
        new: NewPullRequest,
        head: CompactString,
        base: CompactString,
        maintainer_can_modify: Option<bool>,
    },

    /// List the reviews on a pull request
    ListReviews {
        owner: CompactString,
        repo: CompactString,
        number: u64,
    },

    /// Fetch a single review
    GetReview {
        owner: CompactString,
        repo: CompactString,
        number: u64,
        review: u64,
    },
}

/// Response to a [`PullRequestsOp`]
#[derive(Debug, Clone, PartialEq)]
pub enum PullRequestsResponse {
    PullRequest(PullRequest),
    PullRequests(Vec<PullRequest>),
    Files(Vec<PullRequestFile>),
    Reviews(Vec<PullRequestReview>),
    Review(PullRequestReview),
}

/// Request body for `Create`
#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    #[serde(flatten)]
    new: &'a NewPullRequest,
    head: &'a str,
    base: &'a str,
    maintainer_can_modify: bool,
}

/// Execute one pull request operation against the API
pub async fn interpret(
    transport: &Transport,
    config: &Config,
    op: PullRequestsOp,
) -> Result<ApiResponse<PullRequestsResponse>> {
    match op {
        PullRequestsOp::Get { owner, repo, number } => {
            Ok(get(transport, config, &owner, &repo, number)
                .await?
                .map(PullRequestsResponse::PullRequest))
        }
        PullRequestsOp::List { owner, repo, filters, pagination } => {
            Ok(list(transport, config, &owner, &repo, &filters, pagination)
                .await?
                .map(PullRequestsResponse::PullRequests))
        }
        PullRequestsOp::ListFiles { owner, repo, number, pagination } => {
            Ok(list_files(transport, config, &owner, &repo, number, pagination)
                .await?
                .map(PullRequestsResponse::Files))
        }
        PullRequestsOp::Create {
            owner,
            repo,
            new,
            head,
            base,
            maintainer_can_modify,
        } => Ok(create(
            transport,
            config,
            &owner,
            &repo,
            &new,
            &head,
            &base,
            maintainer_can_modify,
        )
        .await?
        .map(PullRequestsResponse::PullRequest)),
        PullRequestsOp::ListReviews { owner, repo, number } => {
            Ok(list_reviews(transport, config, &owner, &repo, number)
                .await?
                .map(PullRequestsResponse::Reviews))
        }
        PullRequestsOp::GetReview { owner, repo, number, review } => {
            Ok(get_review(transport, config, &owner, &repo, number, review)
                .await?
                .map(PullRequestsResponse::Review))
        }
    }
}

/// GET `repos/{owner}/{repo}/pulls/{number}`
pub async fn get(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<ApiResponse<PullRequest>> {
    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/pulls/{number}"),
            config,
            &[],
            None,
            None,
        )
        .await
}

/// GET `repos/{owner}/{repo}/pulls` with filters as query parameters
pub async fn list(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    filters: &[PrFilter],
    pagination: Option<Pagination>,
) -> Result<ApiResponse<Vec<PullRequest>>> {
    let query: Vec<(&str, CompactString)> = filters.iter().map(PrFilter::query_pair).collect();

    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/pulls"),
            config,
            &query,
            pagination,
            None,
        )
        .await
}

/// GET `repos/{owner}/{repo}/pulls/{number}/files`
pub async fn list_files(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    number: u64,
    pagination: Option<Pagination>,
) -> Result<ApiResponse<Vec<PullRequestFile>>> {
    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/pulls/{number}/files"),
            config,
            &[],
            pagination,
            None,
        )
        .await
}

/// POST `repos/{owner}/{repo}/pulls`
#[allow(clippy::too_many_arguments)]
pub async fn create(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    new: &NewPullRequest,
    head: &str,
    base: &str,
    maintainer_can_modify: Option<bool>,
) -> Result<ApiResponse<PullRequest>> {
    let body = create_body(new, head, base, maintainer_can_modify);

    transport
        .execute(
            Method::POST,
            &format_compact!("repos/{owner}/{repo}/pulls"),
            config,
            &[],
            None,
            Some(body),
        )
        .await
}

fn create_body(
    new: &NewPullRequest,
    head: &str,
    base: &str,
    maintainer_can_modify: Option<bool>,
) -> serde_json::Value {
    json!(CreateBody {
        new,
        head,
        base,
        maintainer_can_modify: maintainer_can_modify.unwrap_or(true),
    })
}

/// GET `repos/{owner}/{repo}/pulls/{number}/reviews`
pub async fn list_reviews(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    number: u64,
) -> Result<ApiResponse<Vec<PullRequestReview>>> {
    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/pulls/{number}/reviews"),
            config,
            &[],
            None,
            None,
        )
        .await
}

/// GET `repos/{owner}/{repo}/pulls/{number}/reviews/{review}`
pub async fn get_review(
    transport: &Transport,
    config: &Config,
    owner: &str,
    repo: &str,
    number: u64,
    review: u64,
) -> Result<ApiResponse<PullRequestReview>> {
    transport
        .execute(
            Method::GET,
            &format_compact!("repos/{owner}/{repo}/pulls/{number}/reviews/{review}"),
            config,
            &[],
            None,
            None,
        )
        .await
}
