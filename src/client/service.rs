//! High-level GitHub service operations

use tracing::{debug, instrument};

use super::config::{Config, Pagination};
use super::error::Result;
use super::transport::{ApiResponse, Transport};
use crate::domain::{
    NewPullRequest, PullRequest, PullRequestFile, PullRequestReview, Stargazer, StarredRepository,
    Subscription, User,
};
use crate::ops::{PrFilter, SortDirection, StarredSort, activity, pull_requests, users};

/// High-level typed facade over the operation groups.
///
/// Binds a transport and a config together and exposes one method per
/// operation. For descriptor-level composition across groups, use
/// [`crate::ops::Operation`] and [`crate::ops::run_program`] directly.
#[derive(Debug)]
pub struct GithubService {
    transport: Transport,
    config: Config,
}

impl GithubService {
    /// Create a service against the public GitHub API
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self { transport: Transport::new()?, config })
    }

    /// Create a service from an existing transport
    pub fn from_transport(transport: Transport, config: Config) -> Self {
        Self { transport, config }
    }

    /// Get the per-call configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Fetch a single user by login
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> Result<ApiResponse<User>> {
        users::get(&self.transport, &self.config, username).await
    }

    /// Fetch the authenticated user
    #[instrument(skip(self))]
    pub async fn get_auth_user(&self) -> Result<ApiResponse<User>> {
        users::get_authenticated(&self.transport, &self.config).await
    }

    /// List users, optionally starting after a user id
    #[instrument(skip(self))]
    pub async fn list_users(
        &self,
        since: Option<u64>,
        pagination: Option<Pagination>,
    ) -> Result<ApiResponse<Vec<User>>> {
        let response = users::list(&self.transport, &self.config, since, pagination).await?;
        debug!(user_count = response.result.len(), "fetched users");
        Ok(response)
    }

    /// Fetch a single pull request
    #[instrument(skip(self))]
    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<ApiResponse<PullRequest>> {
        pull_requests::get(&self.transport, &self.config, owner, repo, number).await
    }

    /// List pull requests with filters flattened to query parameters
    #[instrument(skip(self, filters))]
    pub async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        filters: &[PrFilter],
        pagination: Option<Pagination>,
    ) -> Result<ApiResponse<Vec<PullRequest>>> {
        let response =
            pull_requests::list(&self.transport, &self.config, owner, repo, filters, pagination)
                .await?;
        debug!(pr_count = response.result.len(), "fetched pull requests");
        Ok(response)
    }

    /// List the files changed by a pull request
    #[instrument(skip(self))]
    pub async fn list_pull_request_files(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        pagination: Option<Pagination>,
    ) -> Result<ApiResponse<Vec<PullRequestFile>>> {
        pull_requests::list_files(&self.transport, &self.config, owner, repo, number, pagination)
            .await
    }

    /// Open a pull request from a title/body pair or an existing issue
    #[instrument(skip(self, new))]
    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        new: NewPullRequest,
        head: &str,
        base: &str,
        maintainer_can_modify: Option<bool>,
    ) -> Result<ApiResponse<PullRequest>> {
        pull_requests::create(
            &self.transport,
            &self.config,
            owner,
            repo,
            &new,
            head,
            base,
            maintainer_can_modify,
        )
        .await
    }

    /// List the reviews on a pull request
    #[instrument(skip(self))]
    pub async fn list_pull_request_reviews(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<ApiResponse<Vec<PullRequestReview>>> {
        pull_requests::list_reviews(&self.transport, &self.config, owner, repo, number).await
    }

    /// Fetch a single review
    #[instrument(skip(self))]
    pub async fn get_pull_request_review(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        review: u64,
    ) -> Result<ApiResponse<PullRequestReview>> {
        pull_requests::get_review(&self.transport, &self.config, owner, repo, number, review).await
    }

    /// Subscribe to or ignore a notification thread
    #[instrument(skip(self))]
    pub async fn set_thread_subscription(
        &self,
        id: u64,
        subscribed: bool,
        ignored: bool,
    ) -> Result<ApiResponse<Subscription>> {
        activity::set_thread_subscription(&self.transport, &self.config, id, subscribed, ignored)
            .await
    }

    /// List the stargazers of a repository
    #[instrument(skip(self))]
    pub async fn list_stargazers(
        &self,
        owner: &str,
        repo: &str,
        timeline: bool,
        pagination: Option<Pagination>,
    ) -> Result<ApiResponse<Vec<Stargazer>>> {
        activity::list_stargazers(&self.transport, &self.config, owner, repo, timeline, pagination)
            .await
    }

    /// List the repositories starred by a user
    #[instrument(skip(self))]
    pub async fn list_starred_repositories(
        &self,
        username: &str,
        timeline: bool,
        sort: Option<StarredSort>,
        direction: Option<SortDirection>,
        pagination: Option<Pagination>,
    ) -> Result<ApiResponse<Vec<StarredRepository>>> {
        activity::list_starred_repositories(
            &self.transport,
            &self.config,
            username,
            timeline,
            sort,
            direction,
            pagination,
        )
        .await
    }
}
