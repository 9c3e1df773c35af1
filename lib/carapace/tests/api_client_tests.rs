//! Dispatch semantics of `ApiClient` against a canned stub transport.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use assert2::{check, let_assert};
use bytes::Bytes;
use carapace::{
    AllowStatuses, ApiClient, ApiError, ContentType, Error, ErrorDetails, HttpClient,
    JsonApiClient, Method, Request, RequestBody, Response, Result,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct User {
    id: u64,
    display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ApiFault {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct NewOrder {
    item: String,
}

/// Transport stub that records requests and answers with a canned response.
#[derive(Debug, Clone)]
struct StubTransport {
    status: u16,
    body: &'static str,
    fail_connect: bool,
    seen: Arc<Mutex<Vec<Request<Bytes>>>>,
}

impl StubTransport {
    fn respond(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            fail_connect: false,
            seen: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self {
            status: 0,
            body: "",
            fail_connect: true,
            seen: Arc::default(),
        }
    }

    fn last_request(&self) -> Request<Bytes> {
        self.seen
            .lock()
            .expect("lock")
            .last()
            .cloned()
            .expect("at least one request")
    }
}

impl HttpClient for StubTransport {
    async fn execute(&self, request: Request<Bytes>) -> Result<Response<Bytes>> {
        self.seen.lock().expect("lock").push(request);
        if self.fail_connect {
            return Err(Error::connection("connection refused"));
        }
        Ok(Response::new(
            self.status,
            HashMap::new(),
            Bytes::from(self.body),
        ))
    }
}

fn client(stub: StubTransport) -> JsonApiClient<StubTransport> {
    ApiClient::json(stub, "http://api.test/v1/").expect("valid base URL")
}

#[tokio::test]
async fn typed_get_decodes_model() {
    let client = client(StubTransport::respond(
        200,
        r#"{"id":42,"displayName":"Ann"}"#,
    ));

    let user: User = client.get("/users/42").await.expect("user");

    check!(
        user == User {
            id: 42,
            display_name: "Ann".to_string()
        }
    );
}

#[tokio::test]
async fn leading_slash_is_stripped_once_before_joining() {
    let stub = StubTransport::respond(200, "{}");
    let client = client(stub.clone());

    client.get_raw("/users/42").await.expect("response");
    check!(stub.last_request().url().as_str() == "http://api.test/v1/users/42");

    client.get_raw("users/42").await.expect("response");
    check!(stub.last_request().url().as_str() == "http://api.test/v1/users/42");
}

#[tokio::test]
async fn not_found_with_empty_body_has_absent_details() {
    let client = client(StubTransport::respond(404, ""));

    let result = client.get::<User>("/users/999").await;

    let_assert!(Err(err) = result);
    check!(err.to_string() == "API call failed. (HTTP404: http://api.test/v1/users/999)");
    let_assert!(ApiError::Status {
        status, details, ..
    } = err);
    check!(status == 404);
    check!(details.is_absent());
}

#[tokio::test]
async fn plain_text_error_body_degrades_to_text_details() {
    let client = client(StubTransport::respond(500, "Internal Server Error"));

    let result: std::result::Result<User, _> = client
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
    let stub = StubTransport::respond(400, r#"{"code":"bad_item","message":"unknown item"}"#);
    let client: JsonApiClient<StubTransport, ApiFault> =
        ApiClient::json(stub, "http://api.test/").expect("valid base URL");

    let result: std::result::Result<User, _> = client
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
    check!(status == 400);
    check!(
        details
            == ErrorDetails::Parsed(ApiFault {
                code: "bad_item".to_string(),
                message: "unknown item".to_string(),
            })
    );
}

#[tokio::test]
async fn empty_success_body_decodes_to_empty_vec() {
    let client = client(StubTransport::respond(200, ""));

    let users: Vec<User> = client.get("/users").await.expect("users");

    check!(users.is_empty());
}

#[tokio::test]
async fn whitelisted_status_is_not_an_error() {
    let stub = StubTransport::respond(404, "");
    let client = client(stub).with_policy(AllowStatuses::new([404]));

    let response = client.get_raw("/users/999").await.expect("response");
    check!(response.status() == 404);

    let user: Option<User> = client.get("/users/999").await.expect("decoded");
    check!(user.is_none());
}

#[tokio::test]
async fn connectivity_failure_wraps_the_cause() {
    let client = client(StubTransport::failing());

    let result = client.get::<User>("/users/42").await;

    let_assert!(Err(ApiError::Transport(cause)) = result);
    check!(cause.is_connection());
}

#[tokio::test]
async fn redirection_raises_once_under_default_policy() {
    let client = client(StubTransport::respond(302, ""));

    let result = client.get_raw("/login").await;

    let_assert!(Err(ApiError::Status {
        status, details, ..
    }) = result);
    check!(status == 302);
    check!(details.is_absent());
}

#[tokio::test]
async fn post_encodes_typed_payload_as_json() {
    let stub = StubTransport::respond(201, r#"{"id":7,"displayName":"order"}"#);
    let client = client(stub.clone());

    let order = NewOrder {
        item: "x".to_string(),
    };
    let created: User = client.post("/orders", &order).await.expect("created");
    check!(created.id == 7);

    let request = stub.last_request();
    check!(request.method() == Method::Post);
    check!(request.header("Content-Type") == Some("application/json"));
    check!(request.body().map(Bytes::as_ref) == Some(br#"{"item":"x"}"#.as_slice()));
}

#[tokio::test]
async fn prebuilt_body_is_sent_unchanged() {
    let stub = StubTransport::respond(202, "");
    let client = client(stub.clone());

    let body = RequestBody::new(ContentType::PlainText, Bytes::from("raw payload"));
    client.put_body("/notes/1", body).await.expect("accepted");

    let request = stub.last_request();
    check!(request.method() == Method::Put);
    check!(request.header("Content-Type") == Some("text/plain"));
    check!(request.body().map(Bytes::as_ref) == Some(b"raw payload".as_slice()));
}

#[tokio::test]
async fn put_decodes_typed_response() {
    let stub = StubTransport::respond(200, r#"{"id":42,"displayName":"Ann Q."}"#);
    let client = client(stub.clone());

    let updated: User = client
        .put(
            "/users/42",
            &User {
                id: 42,
                display_name: "Ann Q.".to_string(),
            },
        )
        .await
        .expect("updated");

    check!(updated.display_name == "Ann Q.");
    check!(stub.last_request().method() == Method::Put);
}

#[tokio::test]
async fn delete_with_empty_body_yields_default() {
    let stub = StubTransport::respond(204, "");
    let client = client(stub.clone());

    let deleted: Option<User> = client.delete("/users/42").await.expect("deleted");

    check!(deleted.is_none());
    check!(stub.last_request().method() == Method::Delete);
    check!(stub.last_request().body().is_none());
}
