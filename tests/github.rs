//! HTTP-level tests against a wiremock GitHub stand-in.
//!
//! These pin the request contract: paths, verbs, query flattening, body
//! shapes, header defaults and overrides, and how non-success responses
//! surface as typed errors.

use ghops::domain::NewPullRequest;
use ghops::ops::{
    ActivityOp, Operation, PrFilter, PrFilterSort, PrFilterState, PullRequestsOp, UsersOp,
};
use ghops::{ClientError, Config, GithubService, run_program};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(login: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "login": login,
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "html_url": format!("https://github.com/{login}"),
    })
}

fn repo_json(full_name: &str) -> serde_json::Value {
    let name = full_name.split('/').next_back().unwrap_or(full_name);
    json!({
        "id": 10,
        "name": name,
        "full_name": full_name,
        "owner": user_json("octocat"),
        "private": false,
        "fork": false,
        "html_url": format!("https://github.com/{full_name}"),
    })
}

fn pull_request_json(number: u64, title: &str) -> serde_json::Value {
    json!({
        "id": 100 + number,
        "number": number,
        "state": "open",
        "title": title,
        "html_url": format!("https://github.com/o/r/pull/{number}"),
        "created_at": "2024-01-02T03:04:05Z",
    })
}

fn review_json(id: u64, state: &str) -> serde_json::Value {
    json!({
        "id": id,
        "body": "Looks good",
        "state": state,
    })
}

async fn service(server: &MockServer, config: Config) -> GithubService {
    let transport = ghops::Transport::with_base_url(server.uri()).unwrap();
    GithubService::from_transport(transport, config)
}

#[tokio::test]
async fn get_user_hits_users_path_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("octocat")))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh.get_user("octocat").await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.result.login, "octocat");
}

#[tokio::test]
async fn token_sends_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "token ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("me")))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new().with_token("ghp_secret")).await;
    let response = gh.get_auth_user().await.unwrap();
    assert_eq!(response.result.login, "me");
}

#[tokio::test]
async fn unauthenticated_request_omits_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("octocat")))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    gh.get_user("octocat").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("accept").unwrap(),
        "application/vnd.github.v3+json"
    );
}

#[tokio::test]
async fn list_users_passes_since_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("since", "46"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "30"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([user_json("a"), user_json("b")])),
        )
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh
        .list_users(Some(46), Some(ghops::Pagination::new(2, 30)))
        .await
        .unwrap();
    assert_eq!(response.result.len(), 2);
}

#[tokio::test]
async fn list_pull_requests_flattens_filters_last_write_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls"))
        .and(query_param("state", "closed"))
        .and(query_param("sort", "created"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([pull_request_json(1, "One")])),
        )
        .mount(&server)
        .await;

    let filters = [
        PrFilter::State(PrFilterState::Open),
        PrFilter::Sort(PrFilterSort::Created),
        PrFilter::State(PrFilterState::Closed),
    ];
    let gh = service(&server, Config::new()).await;
    let response = gh
        .list_pull_requests("o", "r", &filters, None)
        .await
        .unwrap();
    assert_eq!(response.result[0].number, 1);

    // Exactly one parameter per filter name
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert_eq!(query.matches("state=").count(), 1);
}

#[tokio::test]
async fn list_pull_request_files_uses_files_path_with_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/7/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "sha": "abc123",
            "filename": "src/lib.rs",
            "status": "modified",
            "additions": 3,
            "deletions": 1,
            "changes": 4,
            "blob_url": "https://github.com/o/r/blob/abc123/src/lib.rs",
            "raw_url": "https://github.com/o/r/raw/abc123/src/lib.rs",
            "contents_url": "https://api.github.com/repos/o/r/contents/src/lib.rs",
        }])))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh
        .list_pull_request_files("o", "r", 7, None)
        .await
        .unwrap();
    assert_eq!(response.result[0].filename, "src/lib.rs");

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn create_pull_request_from_title_serializes_data_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/pulls"))
        .and(body_json(json!({
            "title": "Add feature",
            "body": "Please review",
            "head": "octocat:topic",
            "base": "main",
            "maintainer_can_modify": true,
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(pull_request_json(8, "Add feature")),
        )
        .mount(&server)
        .await;

    let gh = service(&server, Config::new().with_token("ghp_secret")).await;
    let new = NewPullRequest::Data {
        title: "Add feature".into(),
        body: Some("Please review".into()),
    };
    let response = gh
        .create_pull_request("o", "r", new, "octocat:topic", "main", None)
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.result.number, 8);
}

#[tokio::test]
async fn create_pull_request_from_issue_serializes_issue_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/o/r/pulls"))
        .and(body_json(json!({
            "issue": 42,
            "head": "topic",
            "base": "main",
            "maintainer_can_modify": false,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(pull_request_json(9, "From issue")))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh
        .create_pull_request("o", "r", NewPullRequest::Issue { issue: 42 }, "topic", "main", Some(false))
        .await
        .unwrap();
    assert_eq!(response.result.number, 9);
}

#[tokio::test]
async fn pull_request_reviews_paths_and_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/3/reviews"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([review_json(11, "APPROVED"), review_json(12, "PENDING")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/3/reviews/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(review_json(11, "APPROVED")))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let reviews = gh.list_pull_request_reviews("o", "r", 3).await.unwrap();
    assert_eq!(reviews.result.len(), 2);

    let review = gh.get_pull_request_review("o", "r", 3, 11).await.unwrap();
    assert_eq!(review.result.id, 11);
}

#[tokio::test]
async fn set_thread_subscription_puts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/notifications/threads/42/subscription"))
        .and(body_json(json!({"subscribed": true, "ignored": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscribed": true,
            "ignored": false,
            "created_at": "2024-01-02T03:04:05Z",
            "url": "https://api.github.com/notifications/threads/42/subscription",
            "thread_url": "https://api.github.com/notifications/threads/42",
        })))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new().with_token("ghp_secret")).await;
    let response = gh.set_thread_subscription(42, true, false).await.unwrap();
    assert!(response.result.subscribed);
    assert!(!response.result.ignored);
}

#[tokio::test]
async fn api_error_carries_status_and_upstream_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest",
        })))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let err = gh.get_user("missing").await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let err = gh.get_user("octocat").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn starred_repositories_timeline_sets_star_media_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/starred"))
        .and(header("Accept", "application/vnd.github.v3.star+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "starred_at": "2024-01-02T03:04:05Z",
            "repo": repo_json("o/starred"),
        }])))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh
        .list_starred_repositories("octocat", true, None, None, None)
        .await
        .unwrap();

    let starred = &response.result[0];
    assert!(starred.starred_at().is_some());
    assert_eq!(starred.repo().full_name, "o/starred");
}

#[tokio::test]
async fn starred_repositories_plain_uses_default_accept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/starred"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json("o/starred")])))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh
        .list_starred_repositories("octocat", false, None, None, None)
        .await
        .unwrap();

    let starred = &response.result[0];
    assert_eq!(starred.starred_at(), None);
    assert_eq!(starred.repo().full_name, "o/starred");
}

#[tokio::test]
async fn stargazers_timeline_decodes_starred_at() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/stargazers"))
        .and(header("Accept", "application/vnd.github.v3.star+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "starred_at": "2024-01-02T03:04:05Z",
            "user": user_json("octocat"),
        }])))
        .mount(&server)
        .await;

    let gh = service(&server, Config::new()).await;
    let response = gh.list_stargazers("o", "r", true, None).await.unwrap();
    assert_eq!(response.result[0].user().login, "octocat");
    assert!(response.result[0].starred_at().is_some());
}

#[tokio::test]
async fn run_program_stops_at_first_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("octocat")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls/1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Server Error"})),
        )
        .mount(&server)
        .await;
    // The operation after the failure must never be issued
    Mock::given(method("GET"))
        .and(path("/repos/o/r/stargazers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let transport = ghops::Transport::with_base_url(server.uri()).unwrap();
    let config = Config::new();
    let program = vec![
        Operation::Users(UsersOp::Get { username: "octocat".into() }),
        Operation::PullRequests(PullRequestsOp::Get {
            owner: "o".into(),
            repo: "r".into(),
            number: 1,
        }),
        Operation::Activity(ActivityOp::ListStargazers {
            owner: "o".into(),
            repo: "r".into(),
            timeline: false,
            pagination: None,
        }),
    ];

    let err = run_program(&transport, &config, program).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Server Error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn run_program_returns_responses_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("octocat")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/pulls"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([pull_request_json(1, "One")])),
        )
        .mount(&server)
        .await;

    let transport = ghops::Transport::with_base_url(server.uri()).unwrap();
    let config = Config::new();
    let program = vec![
        Operation::from(UsersOp::Get { username: "octocat".into() }),
        Operation::from(PullRequestsOp::List {
            owner: "o".into(),
            repo: "r".into(),
            filters: vec![],
            pagination: None,
        }),
    ];

    let responses = run_program(&transport, &config, program).await.unwrap();
    assert_eq!(responses.len(), 2);
    assert!(matches!(
        responses[0].result,
        ghops::OperationResponse::Users(_)
    ));
    assert!(matches!(
        responses[1].result,
        ghops::OperationResponse::PullRequests(_)
    ));
}
