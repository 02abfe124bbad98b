//! GitHub resource records and request payloads.
//!
//! Field names mirror the upstream API's JSON exactly (snake_case preserved,
//! e.g. `html_url`, `maintainer_can_modify`). Fields absent in some API
//! responses are `Option`. No behavior beyond structural equality and
//! (de)serialization.

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A GitHub user account.
///
/// List endpoints return the short form; profile endpoints fill in the
/// optional fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: CompactString,
    pub avatar_url: CompactString,
    pub html_url: CompactString,
    pub name: Option<CompactString>,
    pub email: Option<CompactString>,
    pub company: Option<CompactString>,
    pub blog: Option<CompactString>,
    pub location: Option<CompactString>,
    pub bio: Option<CompactString>,
    pub public_repos: Option<u32>,
    pub followers: Option<u32>,
    pub following: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: CompactString,
    pub full_name: CompactString,
    pub owner: User,
    pub private: bool,
    pub fork: bool,
    pub html_url: CompactString,
    pub description: Option<CompactString>,
    pub default_branch: Option<CompactString>,
    pub language: Option<CompactString>,
    pub stargazers_count: Option<u32>,
    pub watchers_count: Option<u32>,
    pub forks_count: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
}

/// One side of a pull request (`head` or `base`)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestRef {
    pub label: Option<CompactString>,
    #[serde(rename = "ref")]
    pub ref_: CompactString,
    pub sha: Option<CompactString>,
    pub user: Option<User>,
    pub repo: Option<Repository>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub number: u64,
    pub state: CompactString,
    pub title: CompactString,
    pub body: Option<CompactString>,
    pub html_url: CompactString,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
    pub head: Option<PullRequestRef>,
    pub base: Option<PullRequestRef>,
    pub merged: Option<bool>,
    pub mergeable: Option<bool>,
    pub maintainer_can_modify: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestFile {
    pub sha: CompactString,
    pub filename: CompactString,
    pub status: CompactString,
    pub additions: u32,
    pub deletions: u32,
    pub changes: u32,
    pub blob_url: CompactString,
    pub raw_url: CompactString,
    pub contents_url: CompactString,
    pub patch: Option<CompactString>,
}

/// Review verdict as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Pending,
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequestReview {
    pub id: u64,
    pub user: Option<User>,
    pub body: CompactString,
    pub commit_id: Option<CompactString>,
    pub state: PullRequestReviewState,
    pub html_url: Option<CompactString>,
}

/// A notification thread subscription
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Subscription {
    pub subscribed: bool,
    pub ignored: bool,
    pub reason: Option<CompactString>,
    pub created_at: Option<DateTime<Utc>>,
    pub url: CompactString,
    pub thread_url: Option<CompactString>,
}

/// A stargazer of a repository.
///
/// The timeline variant (star media type) wraps the user with the starred
/// timestamp; the plain variant is the bare user. The untagged order matters:
/// the timeline shape must be tried first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Stargazer {
    Timeline {
        starred_at: DateTime<Utc>,
        user: User,
    },
    User(User),
}

impl Stargazer {
    pub fn user(&self) -> &User {
        match self {
            Stargazer::Timeline { user, .. } => user,
            Stargazer::User(user) => user,
        }
    }

    pub fn starred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Stargazer::Timeline { starred_at, .. } => Some(*starred_at),
            Stargazer::User(_) => None,
        }
    }
}

/// A repository starred by a user, in timeline or plain shape
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StarredRepository {
    Timeline {
        starred_at: DateTime<Utc>,
        repo: Repository,
    },
    Repository(Repository),
}

impl StarredRepository {
    pub fn repo(&self) -> &Repository {
        match self {
            StarredRepository::Timeline { repo, .. } => repo,
            StarredRepository::Repository(repo) => repo,
        }
    }

    pub fn starred_at(&self) -> Option<DateTime<Utc>> {
        match self {
            StarredRepository::Timeline { starred_at, .. } => Some(*starred_at),
            StarredRepository::Repository(_) => None,
        }
    }
}

/// Source for a new pull request.
///
/// Either a fresh title/body pair or an existing issue to convert. The two
/// serialized shapes are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NewPullRequest {
    Data {
        title: CompactString,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<CompactString>,
    },
    Issue {
        issue: u64,
    },
}
