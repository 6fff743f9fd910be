use lockbox_client::api_client::ApiClient;
use lockbox_client::config::ClientConfig;
use lockbox_client::error::ClientError;
use lockbox_client::types::{CreateEntryRequest, SavedSession, UpdateEntryRequest};
use lockbox_types::{Category, UserProfile};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup(server: &MockServer) -> ApiClient {
    let config = ClientConfig {
        api_base_url: server.uri(),
        request_timeout_secs: 5,
        auto_lock_secs: None,
    };
    ApiClient::new(config)
}

fn auth_response() -> serde_json::Value {
    serde_json::json!({
        "token": "jwt-token",
        "user": {
            "id": "user-1",
            "email": "test@example.com",
            "salt": "a1b2c3d4e5f60718a1b2c3d4e5f60718"
        }
    })
}

fn wire_entry(id: &str, sealed: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "userId": "user-1",
        "title": "Example",
        "username": "u",
        "encryptedPassword": sealed,
        "category": "other",
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

// --- Auth state ---

#[tokio::test]
async fn not_authenticated_initially() {
    let server = MockServer::start().await;
    let client = setup(&server);
    assert!(!client.is_authenticated().await);
    assert_eq!(client.profile().await, None);
}

#[tokio::test]
async fn login_success_stores_token_and_profile() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    let user = client.login("test@example.com", "Sup3r$ecret!").await.unwrap();
    assert_eq!(user.id, "user-1");
    assert_eq!(user.salt, "a1b2c3d4e5f60718a1b2c3d4e5f60718");
    assert!(client.is_authenticated().await);
    assert_eq!(client.profile().await.unwrap().email, "test@example.com");
}

#[tokio::test]
async fn login_bad_credentials_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    let err = client.login("bad@example.com", "wrong").await.unwrap_err();
    match err {
        ClientError::AuthFailed(msg) => assert_eq!(msg, "Invalid credentials"),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn register_duplicate_email_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "message": "User already exists" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    let result = client.register("dup@example.com", "Sup3r$ecret!").await;
    assert!(matches!(result, Err(ClientError::AuthFailed(_))));
}

#[tokio::test]
async fn logout_clears_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    client.logout().await;
    assert!(!client.is_authenticated().await);
    assert_eq!(client.saved_session().await, None);
}

#[tokio::test]
async fn saved_session_roundtrips_through_restore() {
    let server = MockServer::start().await;
    let client = setup(&server);
    let saved = SavedSession {
        token: "jwt-token".to_string(),
        user: UserProfile {
            id: "user-1".to_string(),
            email: "test@example.com".to_string(),
            salt: "somesalt".to_string(),
        },
    };

    client.restore_session(saved.clone()).await;
    assert!(client.is_authenticated().await);
    assert_eq!(client.saved_session().await, Some(saved));
}

#[tokio::test]
async fn current_user_refreshes_cached_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "user-1",
            "email": "renamed@example.com",
            "salt": "somesalt"
        })))
        .mount(&server)
        .await;

    let client = setup(&server);
    client
        .restore_session(SavedSession {
            token: "jwt-token".to_string(),
            user: UserProfile {
                id: "user-1".to_string(),
                email: "old@example.com".to_string(),
                salt: "somesalt".to_string(),
            },
        })
        .await;

    let user = client.current_user().await.unwrap();
    assert_eq!(user.email, "renamed@example.com");
    assert_eq!(client.profile().await.unwrap().email, "renamed@example.com");
}

#[tokio::test]
async fn delete_account_clears_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/auth/account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Account deleted" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    client.delete_account().await.unwrap();
    assert!(!client.is_authenticated().await);
}

// --- Entries ---

#[tokio::test]
async fn list_entries_requires_auth_locally() {
    let server = MockServer::start().await;
    let client = setup(&server);

    let result = client.list_entries().await;
    assert!(matches!(result, Err(ClientError::AuthRequired)));
    // No request should reach the server without a token
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_entries_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passwords"))
        .and(header("Authorization", "Bearer jwt-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([wire_entry("e1", "sealed")])),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let entries = client.list_entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "e1");
    assert_eq!(entries[0].encrypted_password, "sealed");
}

#[tokio::test]
async fn expired_token_maps_to_auth_required() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passwords"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "message": "Token is not valid" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let result = client.list_entries().await;
    assert!(matches!(result, Err(ClientError::AuthRequired)));
}

#[tokio::test]
async fn create_entry_posts_wire_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/passwords"))
        .respond_with(ResponseTemplate::new(201).set_body_json(wire_entry("e1", "sealed-pw")))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let created = client
        .create_entry(&CreateEntryRequest {
            title: "Example".to_string(),
            username: "u".to_string(),
            encrypted_password: "sealed-pw".to_string(),
            url: None,
            notes: None,
            category: Category::Other,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "e1");

    // Request body must carry the sealed password under the API field name
    let requests = server.received_requests().await.unwrap();
    let create_req = requests
        .iter()
        .find(|r| r.url.path() == "/passwords")
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&create_req.body).unwrap();
    assert_eq!(body["encryptedPassword"], "sealed-pw");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn update_missing_entry_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/passwords/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "message": "Password entry not found" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let result = client
        .update_entry("missing", &UpdateEntryRequest::default())
        .await;
    assert!(matches!(result, Err(ClientError::NotFound(_))));
}

#[tokio::test]
async fn delete_entry_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/passwords/e1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Password entry deleted" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    client.delete_entry("e1").await.unwrap();
}

#[tokio::test]
async fn search_sends_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passwords/search"))
        .and(query_param("q", "bank"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let entries = client.search_entries("bank").await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn server_error_surfaces_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passwords"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "message": "Something went wrong!" })),
        )
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let err = client.list_entries().await.unwrap_err();
    match err {
        ClientError::Api(msg) => assert_eq!(msg, "Something went wrong!"),
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_without_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passwords"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = setup(&server);
    client.login("test@example.com", "pw").await.unwrap();
    let err = client.list_entries().await.unwrap_err();
    match err {
        ClientError::Api(msg) => assert!(msg.contains("502"), "unexpected message: {msg}"),
        other => panic!("expected Api error, got {other:?}"),
    }
}
