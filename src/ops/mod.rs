//! Operation groups and the composition layer.
//!
//! Each group is a closed enum describing its API calls as data. The
//! [`Operation`] wrapper combines the groups into one interpretable type
//! without any group knowing about the others; [`run_program`] executes a
//! sequence of such operations in order, short-circuiting on the first
//! error.

pub mod activity;
pub mod pull_requests;
pub mod users;

use tracing::instrument;

pub use activity::{ActivityOp, ActivityResponse, StarredSort};
pub use pull_requests::{
    PrFilter, PrFilterSort, PrFilterState, PullRequestsOp, PullRequestsResponse, SortDirection,
};
pub use users::{UsersOp, UsersResponse};

use crate::client::{ApiResponse, Config, Result, Transport};

/// One GitHub API call from any operation group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Users(UsersOp),
    PullRequests(PullRequestsOp),
    Activity(ActivityOp),
}

impl From<UsersOp> for Operation {
    fn from(op: UsersOp) -> Self {
        Operation::Users(op)
    }
}

impl From<PullRequestsOp> for Operation {
    fn from(op: PullRequestsOp) -> Self {
        Operation::PullRequests(op)
    }
}

impl From<ActivityOp> for Operation {
    fn from(op: ActivityOp) -> Self {
        Operation::Activity(op)
    }
}

/// Response to an [`Operation`], tagged by group
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResponse {
    Users(UsersResponse),
    PullRequests(PullRequestsResponse),
    Activity(ActivityResponse),
}

/// Execute one operation by dispatching it to its group interpreter
#[instrument(skip(transport, config, op))]
pub async fn interpret(
    transport: &Transport,
    config: &Config,
    op: Operation,
) -> Result<ApiResponse<OperationResponse>> {
    match op {
        Operation::Users(op) => Ok(users::interpret(transport, config, op)
            .await?
            .map(OperationResponse::Users)),
        Operation::PullRequests(op) => Ok(pull_requests::interpret(transport, config, op)
            .await?
            .map(OperationResponse::PullRequests)),
        Operation::Activity(op) => Ok(activity::interpret(transport, config, op)
            .await?
            .map(OperationResponse::Activity)),
    }
}

/// Execute a sequence of operations in order.
///
/// Stops at the first error and propagates it unchanged; operations after
/// the failing one are never issued.
pub async fn run_program(
    transport: &Transport,
    config: &Config,
    program: Vec<Operation>,
) -> Result<Vec<ApiResponse<OperationResponse>>> {
    let mut responses = Vec::with_capacity(program.len());
    for op in program {
        responses.push(interpret(transport, config, op).await?);
    }
    Ok(responses)
}
