//! GitHub API demo
//!
//! Describes a few GitHub endpoints as services and runs them with courier.
//!
//! ```text
//! RUST_LOG=courier=debug cargo run -p github-api-demo -- rust-lang rust
//! ```

// Demo-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]
#![allow(dead_code)]

use std::borrow::Cow;

use courier::prelude::*;
use tracing_subscriber::EnvFilter;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "courier-github-demo/0.1.0";

// ============================================================================
// Data Types
// ============================================================================

/// A GitHub contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u32,
}

/// A GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
}

/// Request to create a GitHub issue.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// A GitHub issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u32,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
}

/// Error body GitHub sends with 4xx/5xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubError {
    pub message: String,
    pub documentation_url: Option<String>,
}

// ============================================================================
// Services
// ============================================================================

fn github_headers() -> Vec<(String, String)> {
    vec![
        (
            header::ACCEPT.to_string(),
            "application/vnd.github+json".to_string(),
        ),
        (header::USER_AGENT.to_string(), USER_AGENT.to_string()),
    ]
}

/// `GET /repos/{owner}/{repo}`
pub struct GetRepository<'a> {
    pub base_url: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
}

impl NetworkingService for GetRepository<'_> {
    type Output = Repository;
    type ErrorResponse = GitHubError;

    fn base_url(&self) -> &str {
        self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/repos/{}/{}", self.owner, self.repo).into()
    }

    fn headers(&self) -> Vec<(String, String)> {
        github_headers()
    }
}

/// `GET /repos/{owner}/{repo}/contributors`
pub struct ListContributors<'a> {
    pub base_url: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub per_page: u32,
}

impl NetworkingService for ListContributors<'_> {
    type Output = Vec<Contributor>;
    type ErrorResponse = GitHubError;

    fn base_url(&self) -> &str {
        self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/repos/{}/{}/contributors", self.owner, self.repo).into()
    }

    fn headers(&self) -> Vec<(String, String)> {
        github_headers()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![("per_page".to_string(), self.per_page.to_string())]
    }
}

/// `GET /repos/{owner}/{repo}/issues`
pub struct ListIssues<'a> {
    pub base_url: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub state: Option<&'a str>,
    pub per_page: Option<u32>,
}

impl NetworkingService for ListIssues<'_> {
    type Output = Vec<Issue>;
    type ErrorResponse = GitHubError;

    fn base_url(&self) -> &str {
        self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/repos/{}/{}/issues", self.owner, self.repo).into()
    }

    fn headers(&self) -> Vec<(String, String)> {
        github_headers()
    }

    fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(state) = self.state {
            query.push(("state".to_string(), state.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }
        query
    }
}

/// `POST /repos/{owner}/{repo}/issues`
pub struct CreateIssue<'a> {
    pub base_url: &'a str,
    pub owner: &'a str,
    pub repo: &'a str,
    pub token: &'a str,
    pub issue: NewIssue,
}

impl NetworkingService for CreateIssue<'_> {
    type Output = Issue;
    type ErrorResponse = GitHubError;

    fn base_url(&self) -> &str {
        self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/repos/{}/{}/issues", self.owner, self.repo).into()
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = github_headers();
        headers.push((
            header::AUTHORIZATION.to_string(),
            format!("Bearer {}", self.token),
        ));
        headers
    }

    fn body(&self) -> Result<Option<Body>> {
        Body::json(&self.issue).map(Some)
    }
}

// ============================================================================
// Main
// ============================================================================

fn describe(err: &ServiceError<GitHubError>) -> String {
    match err.error_response() {
        Some(body) => format!("{err}: {}", body.message),
        None => err.to_string(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let owner = args.next().unwrap_or_else(|| "rust-lang".to_string());
    let repo = args.next().unwrap_or_else(|| "rust".to_string());

    let executor = RequestExecutor::with_client(HyperClient::builder().with_logging().build());

    let repository = GetRepository {
        base_url: GITHUB_API,
        owner: &owner,
        repo: &repo,
    };
    match executor.execute(&repository).await {
        Ok(repository) => println!(
            "{} ({} stars, {} forks)",
            repository.full_name, repository.stargazers_count, repository.forks_count
        ),
        Err(err) => {
            tracing::error!(error = %describe(&err), "unable to fetch repository");
            return;
        }
    }

    let contributors = ListContributors {
        base_url: GITHUB_API,
        owner: &owner,
        repo: &repo,
        per_page: 5,
    };
    match executor.execute(&contributors).await {
        Ok(contributors) => {
            for contributor in contributors {
                println!("  {} ({})", contributor.login, contributor.contributions);
            }
        }
        Err(err) => tracing::warn!(error = %describe(&err), "unable to list contributors"),
    }
}

// ============================================================================
// Tests using wiremock
// ============================================================================

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param},
    };

    use super::*;

    fn executor() -> RequestExecutor<HyperClient> {
        RequestExecutor::new()
    }

    #[tokio::test]
    async fn test_get_repository() {
        let mock_server = MockServer::start().await;

        let repo = Repository {
            id: 12345,
            name: "rust".to_string(),
            full_name: "rust-lang/rust".to_string(),
            description: Some("The Rust programming language".to_string()),
            stargazers_count: 90000,
            forks_count: 12000,
        };

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust"))
            .and(header("User-Agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(&repo))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let service = GetRepository {
            base_url: &uri,
            owner: "rust-lang",
            repo: "rust",
        };

        let_assert!(Ok(result) = executor().execute(&service).await);
        check!(result == repo);
    }

    #[tokio::test]
    async fn test_list_issues_with_query_params() {
        let mock_server = MockServer::start().await;

        let issues = vec![Issue {
            id: 1,
            number: 42,
            title: "Example issue".to_string(),
            body: Some("Issue body".to_string()),
            state: "open".to_string(),
        }];

        Mock::given(method("GET"))
            .and(path("/repos/rust-lang/rust/issues"))
            .and(query_param("state", "open"))
            .and(query_param("per_page", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&issues))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let service = ListIssues {
            base_url: &uri,
            owner: "rust-lang",
            repo: "rust",
            state: Some("open"),
            per_page: Some(5),
        };

        let_assert!(Ok(result) = executor().execute(&service).await);
        check!(result == issues);
    }

    #[tokio::test]
    async fn test_create_issue_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/repos/rust-lang/rust/issues"))
            .and(header("Authorization", "Bearer wrong"))
            .and(body_json(serde_json::json!({"title": "Bug", "body": null})))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&mock_server)
            .await;

        let uri = mock_server.uri();
        let service = CreateIssue {
            base_url: &uri,
            owner: "rust-lang",
            repo: "rust",
            token: "wrong",
            issue: NewIssue {
                title: "Bug".to_string(),
                body: None,
                labels: Vec::new(),
            },
        };

        let_assert!(Err(err) = executor().execute(&service).await);
        check!(err.status() == Some(Status::Code(401)));
        check!(describe(&err) == "networking error: HTTP 401 Unauthorized: Bad credentials");
    }
}
