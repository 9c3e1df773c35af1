//! Integration tests for `ApiClient` over `HyperTransport` using wiremock.

use std::time::Duration;

use assert2::{check, let_assert};
use carapace::{
    AllowStatuses, ApiClient, ApiError, ErrorDetails, HyperTransport, JsonApiClient,
    TransportConfig,
};
use serde::{Deserialize, Serialize};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: u64,
    display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ApiFault {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct NewOrder {
    item: String,
}

fn json_client(server: &MockServer) -> JsonApiClient<HyperTransport, ApiFault> {
    ApiClient::json(HyperTransport::new(), server.uri()).expect("valid base URL")
}

#[tokio::test]
async fn get_user_decodes_typed_model() {
    let server = MockServer::start().await;
    let user = User {
        id: 42,
        display_name: "Ann".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&user))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let fetched: User = client.get("/users/42").await.expect("user");

    check!(fetched == user);
}

#[tokio::test]
async fn post_sends_json_and_decodes_created() {
    let server = MockServer::start().await;
    let created = User {
        id: 7,
        display_name: "order".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/orders"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"item": "x"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let result: User = client
        .post(
            "/orders",
            &NewOrder {
                item: "x".to_string(),
            },
        )
        .await
        .expect("created");

    check!(result == created);
}

#[tokio::test]
async fn not_found_raises_status_error_with_absent_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let result = client.get::<User>("/users/999").await;

    let_assert!(Err(err) = result);
    check!(err.to_string() == format!("API call failed. (HTTP404: {}/users/999)", server.uri()));
    let_assert!(ApiError::Status {
        status, details, ..
    } = err);
    check!(status == 404);
    check!(details.is_absent());
}

#[tokio::test]
async fn plain_text_error_body_degrades_to_text_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let result: Result<User, _> = client
        .post(
            "/orders",
            &NewOrder {
                item: "x".to_string(),
            },
        )
        .await;

    let_assert!(Err(ApiError::Status {
        status, details, ..
    }) = result);
    check!(status == 500);
    check!(details == ErrorDetails::Text("Internal Server Error".to_string()));
}

#[tokio::test]
async fn structured_error_body_is_parsed() {
    let server = MockServer::start().await;
    let fault = ApiFault {
        code: "unprocessable".to_string(),
        message: "item is required".to_string(),
    };

    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(422).set_body_json(&fault))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let result: Result<User, _> = client
        .post(
            "/orders",
            &NewOrder {
                item: String::new(),
            },
        )
        .await;

    let_assert!(Err(ApiError::Status {
        status, details, ..
    }) = result);
    check!(status == 422);
    check!(details == ErrorDetails::Parsed(fault));
}

#[tokio::test]
async fn whitelisted_not_found_is_a_plain_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/999"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = json_client(&server).with_policy(AllowStatuses::new([404]));
    let user: Option<User> = client.get("/users/999").await.expect("decoded");

    check!(user.is_none());
}

#[tokio::test]
async fn connection_failure_is_a_transport_error() {
    // Nothing listens on the discard port; the exchange never completes.
    let client: JsonApiClient<HyperTransport> =
        ApiClient::json(HyperTransport::new(), "http://127.0.0.1:9").expect("valid base URL");

    let result = client.get_raw("/ping").await;

    let_assert!(Err(ApiError::Transport(cause)) = result);
    check!(cause.is_connection());
}

#[tokio::test]
async fn slow_response_times_out_as_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = HyperTransport::with_config(
        TransportConfig::builder()
            .timeout(Duration::from_millis(100))
            .build(),
    );
    let client: JsonApiClient<HyperTransport> =
        ApiClient::json(transport, server.uri()).expect("valid base URL");

    let result = client.get_raw("/slow").await;

    let_assert!(Err(ApiError::Transport(cause)) = result);
    check!(cause.is_timeout());
}

#[tokio::test]
async fn delete_returns_raw_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/42"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = json_client(&server);
    let response = client.delete_raw("/users/42").await.expect("response");

    check!(response.status() == 204);
    check!(response.body().is_empty());
}
