//! Integration tests for `RequestExecutor` over `HyperClient` using wiremock.

use std::borrow::Cow;
use std::time::Duration;

use assert2::{check, let_assert};
use courier::{
    Body, ClientConfig, Empty, HyperClient, Method, NetworkingService, RequestExecutor, Result,
    ServiceError, Status,
};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// Service Descriptions
// ============================================================================

struct GetUser {
    base_url: String,
    id: u64,
}

impl NetworkingService for GetUser {
    type Output = User;
    type ErrorResponse = ApiError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/users/{}", self.id).into()
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![("Accept".to_string(), "application/json".to_string())]
    }
}

struct CreateUser {
    base_url: String,
    user: User,
}

impl NetworkingService for CreateUser {
    type Output = User;
    type ErrorResponse = ApiError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/users")
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn body(&self) -> Result<Option<Body>> {
        Body::json(&self.user).map(Some)
    }
}

struct DeleteUser {
    base_url: String,
    id: u64,
}

impl NetworkingService for DeleteUser {
    type Output = Empty;
    type ErrorResponse = ApiError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        format!("/users/{}", self.id).into()
    }

    fn method(&self) -> Method {
        Method::Delete
    }
}

struct SearchUsers {
    base_url: String,
    query: &'static str,
}

impl NetworkingService for SearchUsers {
    type Output = Vec<User>;
    type ErrorResponse = ApiError;

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed("/search")
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![
            ("q".to_string(), self.query.to_string()),
            ("page".to_string(), "1".to_string()),
        ]
    }
}

fn alice() -> User {
    User {
        id: 1,
        name: "Alice".to_string(),
    }
}

// ============================================================================
// Success Path
// ============================================================================

#[tokio::test]
async fn test_get_decodes_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Ok(user) = executor.execute(&service).await);
    check!(user == alice());
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    let input = User {
        id: 0,
        name: "Bob".to_string(),
    };
    let output = User {
        id: 42,
        name: "Bob".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/users"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&input))
        .respond_with(ResponseTemplate::new(201).set_body_json(&output))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = CreateUser {
        base_url: mock_server.uri(),
        user: input,
    };

    let_assert!(Ok(created) = executor.execute(&service).await);
    check!(created == output);
}

#[tokio::test]
async fn test_no_content_with_empty_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = DeleteUser {
        base_url: mock_server.uri(),
        id: 7,
    };

    let_assert!(Ok(Empty) = executor.execute(&service).await);
}

#[tokio::test]
async fn test_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust lang"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![alice()]))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = SearchUsers {
        base_url: mock_server.uri(),
        query: "rust lang",
    };

    let_assert!(Ok(users) = executor.execute(&service).await);
    check!(users == vec![alice()]);
}

// ============================================================================
// Failure Classification
// ============================================================================

#[tokio::test]
async fn test_not_found_with_decoded_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "not found"})),
        )
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 404,
    };

    let_assert!(Err(ServiceError::Networking(err)) = executor.execute(&service).await);
    check!(err.status() == Status::Code(404));
    check!(
        err.response()
            == Some(&ApiError {
                message: "not found".to_string()
            })
    );
}

#[tokio::test]
async fn test_server_error_with_undecodable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Err(ServiceError::Networking(err)) = executor.execute(&service).await);
    check!(err.status() == Status::Code(500));
    check!(err.response().is_none());
}

#[tokio::test]
async fn test_redirect_is_not_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Err(err) = executor.execute(&service).await);
    check!(err.status() == Some(Status::Code(302)));
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"one"}"#))
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Err(ServiceError::Decode(err)) = executor.execute(&service).await);
    check!(err.to_string().contains("id"));
}

#[tokio::test]
async fn test_invalid_url_fails_before_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: format!("{}/bad path", mock_server.uri()),
        id: 1,
    };

    let_assert!(Err(ServiceError::Networking(err)) = executor.execute(&service).await);
    check!(err.status() == Status::UnableToParseResponse);
    check!(err.response().is_none());
}

// ============================================================================
// Transport
// ============================================================================

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::with_config(
        ClientConfig::builder()
            .timeout(Duration::from_millis(100))
            .build(),
    );
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Err(ServiceError::Transport(err)) = executor.execute(&service).await);
    check!(err.is_timeout());
}

#[tokio::test]
async fn test_envelope_timeout_overrides_engine_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let engine = HyperClient::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let executor = RequestExecutor::with_client(engine).with_timeout(Duration::from_secs(5));
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Ok(user) = executor.execute(&service).await);
    check!(user == alice());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: "http://127.0.0.1:1".to_string(),
        id: 1,
    };

    let_assert!(Err(ServiceError::Transport(err)) = executor.execute(&service).await);
    check!(err.is_connection());
}

/// Headers arrive on time, the body never completes.
async fn stalled_body_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut request = [0_u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n{")
            .await
            .expect("write head");
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_timeout_covers_body_read() {
    let executor = RequestExecutor::new().with_timeout(Duration::from_millis(200));
    let service = GetUser {
        base_url: stalled_body_server().await,
        id: 1,
    };

    let outcome = tokio::time::timeout(Duration::from_secs(5), executor.execute(&service)).await;

    let_assert!(Ok(Err(ServiceError::Transport(err))) = outcome);
    check!(err.is_timeout());
}

// ============================================================================
// Raw Responses
// ============================================================================

#[tokio::test]
async fn test_execute_raw_keeps_repeated_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "session=abc")
                .append_header("set-cookie", "theme=dark")
                .set_body_json(alice()),
        )
        .mount(&mock_server)
        .await;

    let executor = RequestExecutor::new();
    let service = GetUser {
        base_url: mock_server.uri(),
        id: 1,
    };

    let_assert!(Ok(response) = executor.execute_raw(&service).await);
    let cookies: Vec<_> = response.headers().get_all("set-cookie").iter().collect();
    check!(cookies == ["session=abc", "theme=dark"]);
    check!(response.status() == Some(200));
}

#[tokio::test]
async fn test_header_names_differing_by_case_are_sent_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice()))
        .mount(&mock_server)
        .await;

    struct GetUserOverridingAccept {
        base_url: String,
    }

    impl NetworkingService for GetUserOverridingAccept {
        type Output = User;
        type ErrorResponse = ApiError;

        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn path(&self) -> Cow<'_, str> {
            Cow::Borrowed("/users/1")
        }

        fn headers(&self) -> Vec<(String, String)> {
            vec![
                ("Accept".to_string(), "text/plain".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ]
        }
    }

    let executor = RequestExecutor::new();
    let service = GetUserOverridingAccept {
        base_url: mock_server.uri(),
    };

    let_assert!(Ok(user) = executor.execute(&service).await);
    check!(user == alice());

    let received = mock_server.received_requests().await.expect("recording enabled");
    let_assert!([request] = received.as_slice());
    check!(request.headers.get_all("accept").iter().count() == 1);
}
