#![allow(clippy::unwrap_used)]
// Integration tests for `RegistryClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rollcall_api::{AccessToken, Error, NewStudent, RegistryClient, StudentUpdate};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RegistryClient, AccessToken) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RegistryClient::with_client(reqwest::Client::new(), base_url);
    (server, client, AccessToken::new("test-token"))
}

fn student_json(id: i64, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "lastName": "Cruz",
        "firstName": "Ana",
        "middleInitial": "",
        "course": "BSCS",
        "year": 3,
        "gender": "F",
        "graduating": true
    })
}

fn sample_update() -> StudentUpdate {
    StudentUpdate {
        last_name: "Cruz".into(),
        first_name: "Ana".into(),
        middle_initial: "B".into(),
        course: "BSCS".into(),
        year: 4,
        gender: "F".into(),
        graduating: true,
    }
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_students_sends_bearer_and_parses() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([student_json(1, "a@x.com"), student_json(2, "b@x.com")])),
        )
        .mount(&server)
        .await;

    let students = client.list_students(&token).await.unwrap();

    assert_eq!(students.len(), 2);
    assert_eq!(students[0].id, 1);
    assert_eq!(students[0].email, "a@x.com");
    assert_eq!(students[1].id, 2);
}

#[tokio::test]
async fn list_students_null_middle_initial_is_empty() {
    let (server, client, token) = setup().await;

    let mut record = student_json(5, "n@x.com");
    record["middleInitial"] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record])))
        .mount(&server)
        .await;

    let students = client.list_students(&token).await.unwrap();
    assert_eq!(students[0].middle_initial, "");
}

#[tokio::test]
async fn list_students_server_error_carries_status() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client.list_students(&token).await;
    assert!(
        matches!(result, Err(Error::Fetch { status: 503 })),
        "expected Fetch error, got: {result:?}"
    );
}

#[tokio::test]
async fn list_students_401_is_session_expired() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_students(&token).await;
    match result {
        Err(ref e @ Error::SessionExpired) => assert!(e.is_auth_expired()),
        other => panic!("expected SessionExpired, got: {other:?}"),
    }
}

// ── Registration ────────────────────────────────────────────────────

#[tokio::test]
async fn create_student_posts_full_payload() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "email": "new@x.com",
            "lastName": "Santos",
            "year": 1,
            "graduating": false,
            "password": "longenough"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(student_json(9, "new@x.com")))
        .mount(&server)
        .await;

    let new_student = NewStudent {
        email: "new@x.com".into(),
        last_name: "Santos".into(),
        first_name: "Rico".into(),
        middle_initial: String::new(),
        course: "BSIT".into(),
        year: 1,
        gender: "M".into(),
        graduating: false,
        password: "longenough".to_string().into(),
    };
    client.create_student(&token, &new_student).await.unwrap();
}

#[tokio::test]
async fn create_student_surfaces_server_detail() {
    let (server, client, token) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let new_student = NewStudent {
        email: "dup@x.com".into(),
        last_name: "Santos".into(),
        first_name: "Rico".into(),
        middle_initial: String::new(),
        course: "BSIT".into(),
        year: 1,
        gender: "M".into(),
        graduating: false,
        password: "longenough".to_string().into(),
    };
    let result = client.create_student(&token, &new_student).await;

    match result {
        Err(Error::Create { status, ref detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("expected Create error, got: {other:?}"),
    }
}

// ── Update / delete ─────────────────────────────────────────────────

#[tokio::test]
async fn update_student_puts_to_record_path() {
    let (server, client, token) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/admin/students/3"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({"middleInitial": "B", "year": 4})))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.update_student(&token, 3, &sample_update()).await.unwrap();
}

#[tokio::test]
async fn update_student_failure_carries_status_and_detail() {
    let (server, client, token) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/admin/students/3"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "invalid year"})))
        .mount(&server)
        .await;

    let result = client.update_student(&token, 3, &sample_update()).await;
    match result {
        Err(Error::Update { status, ref detail }) => {
            assert_eq!(status, 422);
            assert_eq!(detail, "invalid year");
        }
        other => panic!("expected Update error, got: {other:?}"),
    }
}

#[tokio::test]
async fn delete_student_hits_record_path() {
    let (server, client, token) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/students/12"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client.delete_student(&token, 12).await.unwrap();
}

#[tokio::test]
async fn delete_student_failure_carries_status() {
    let (server, client, token) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/students/12"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = client.delete_student(&token, 12).await;
    assert!(
        matches!(result, Err(Error::Delete { status: 404 })),
        "expected Delete error, got: {result:?}"
    );
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn authenticate_exchanges_form_credentials() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "tok-abc", "token_type": "bearer"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter22".to_string().into();
    let token = client.authenticate("admin@x.com", &secret).await.unwrap();
    assert_eq!(token.expose(), "tok-abc");
}

#[tokio::test]
async fn authenticate_failure_includes_detail() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.authenticate("admin@x.com", &secret).await;

    match result {
        Err(Error::Auth { status, ref detail }) => {
            assert_eq!(status, 401);
            assert!(detail.contains("Incorrect"));
        }
        other => panic!("expected Auth error, got: {other:?}"),
    }
}

// ── Session probe ───────────────────────────────────────────────────

#[tokio::test]
async fn list_users_401_invalidates_session() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_users(&token).await;
    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn list_users_parses_minimal_shape() {
    let (server, client, token) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "email": "admin@x.com", "role": "admin", "extra": "ignored"}
        ])))
        .mount(&server)
        .await;

    let users = client.list_users(&token).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role.as_deref(), Some("admin"));
}
