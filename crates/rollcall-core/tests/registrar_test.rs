#![allow(clippy::unwrap_used)]
// Mediator tests against a wiremock backend: refresh atomicity, the
// local validation boundary, and failure isolation for the store.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rollcall_api::{AccessToken, RegistryClient};
use rollcall_core::{CoreError, IntentState, Registrar};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Registrar) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RegistryClient::with_client(reqwest::Client::new(), base_url);
    let registrar = Registrar::new(client, AccessToken::new("test-token"));
    (server, registrar)
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

async fn mount_listing(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_replaces_snapshot() {
    let (server, registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com"), student_json(2, "b@x.com")])).await;

    registrar.refresh().await.unwrap();

    let snap = registrar.store().snapshot();
    assert_eq!(snap.len(), 2);
    assert_eq!(snap[0].email, "a@x.com");
}

#[tokio::test]
async fn refresh_twice_yields_identical_snapshot() {
    let (server, registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;

    registrar.refresh().await.unwrap();
    let first = registrar.store().snapshot();
    registrar.refresh().await.unwrap();
    let second = registrar.store().snapshot();

    assert_eq!(*first, *second);
}

#[tokio::test]
async fn failed_refresh_leaves_previous_snapshot() {
    let (server, registrar) = setup().await;

    let ok = Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([student_json(1, "a@x.com")])))
        .expect(1)
        .mount_as_scoped(&server)
        .await;
    registrar.refresh().await.unwrap();
    drop(ok);

    Mock::given(method("GET"))
        .and(path("/admin/students"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = registrar.refresh().await;
    assert!(result.is_err());

    let snap = registrar.store().snapshot();
    assert_eq!(snap.len(), 1, "last-known-good snapshot must survive");
    assert_eq!(snap[0].id, 1);
}

// ── Validation boundary ─────────────────────────────────────────────

#[tokio::test]
async fn short_passwords_reject_locally_without_network() {
    let (server, mut registrar) = setup().await;

    // No /register mock is mounted: any network call would 404 and the
    // error kind would differ from the expected local validation error.
    for password in ["", "a", "1234567"] {
        let intent = registrar.begin_create();
        intent.form.email = "new@x.com".into();
        intent.form.password = password.to_string().into();

        let result = registrar.submit().await;
        assert!(
            matches!(result, Err(CoreError::Validation { ref field, .. }) if field == "password"),
            "password {password:?} should fail local validation, got: {result:?}"
        );
        // Intent stays open for correction.
        assert!(matches!(registrar.intent(), IntentState::Creating(_)));
    }

    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "no request may be issued for a locally rejected create"
    );
}

#[tokio::test]
async fn eight_character_password_reaches_the_network() {
    let (server, mut registrar) = setup().await;

    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    mount_listing(&server, json!([student_json(1, "new@x.com")])).await;

    let intent = registrar.begin_create();
    intent.form.email = "new@x.com".into();
    intent.form.last_name = "Santos".into();
    intent.form.first_name = "Rico".into();
    intent.form.course = "BSIT".into();
    intent.form.gender = "M".into();
    intent.form.password = "12345678".to_string().into();

    registrar.submit().await.unwrap();

    assert!(matches!(registrar.intent(), IntentState::Closed));
    assert_eq!(registrar.store().len(), 1, "success triggers a resync");
}

// ── Failure isolation ───────────────────────────────────────────────

#[tokio::test]
async fn rejected_update_keeps_snapshot_and_intent() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;
    registrar.refresh().await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/admin/students/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let before = registrar.store().snapshot();
    let intent = registrar.begin_edit(1);
    intent.fields.course = "BSIT".into();

    let result = registrar.submit().await;
    assert!(matches!(result, Err(CoreError::Api(_))));

    // Store untouched, intent open for retry with the edit preserved.
    assert_eq!(*registrar.store().snapshot(), *before);
    match registrar.intent() {
        IntentState::Editing(edit) => assert_eq!(edit.fields.course, "BSIT"),
        other => panic!("expected Editing intent, got: {other:?}"),
    }
}

#[tokio::test]
async fn successful_edit_resyncs_and_closes() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;
    registrar.refresh().await.unwrap();

    Mock::given(method("PUT"))
        .and(path("/admin/students/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let version_before = registrar.store().version();
    registrar.begin_edit(1).fields.year = 4;
    registrar.submit().await.unwrap();

    assert!(matches!(registrar.intent(), IntentState::Closed));
    assert!(registrar.store().version() > version_before);
}

#[tokio::test]
async fn edit_intent_is_prefilled_from_snapshot() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(7, "pre@x.com")])).await;
    registrar.refresh().await.unwrap();

    let intent = registrar.begin_edit(7);
    assert_eq!(intent.id, 7);
    assert_eq!(intent.fields.last_name, "Cruz");
    assert_eq!(intent.fields.year, 3);
    assert!(intent.fields.graduating);
}

#[tokio::test]
#[should_panic(expected = "not in the current snapshot")]
async fn begin_edit_panics_on_unknown_id() {
    let (_server, mut registrar) = setup().await;
    let _ = registrar.begin_edit(42);
}

#[tokio::test]
async fn opening_a_new_intent_discards_the_old_one() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;
    registrar.refresh().await.unwrap();

    registrar.begin_edit(1).fields.course = "BSIT".into();
    let create = registrar.begin_create();
    assert!(create.form.email.is_empty());
    assert!(matches!(registrar.intent(), IntentState::Creating(_)));
}

#[tokio::test]
async fn submit_without_intent_is_an_error() {
    let (_server, mut registrar) = setup().await;
    let result = registrar.submit().await;
    assert!(matches!(result, Err(CoreError::NoIntent)));
}

// ── Removal ─────────────────────────────────────────────────────────

#[tokio::test]
async fn remove_deletes_and_resyncs() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;
    registrar.refresh().await.unwrap();

    server.reset().await;
    Mock::given(method("DELETE"))
        .and(path("/admin/students/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_listing(&server, json!([])).await;

    registrar.remove(1).await.unwrap();
    assert!(registrar.store().is_empty());
}

#[tokio::test]
async fn rejected_remove_leaves_snapshot() {
    let (server, mut registrar) = setup().await;
    mount_listing(&server, json!([student_json(1, "a@x.com")])).await;
    registrar.refresh().await.unwrap();

    Mock::given(method("DELETE"))
        .and(path("/admin/students/1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let result = registrar.remove(1).await;
    assert!(result.is_err());
    assert_eq!(registrar.store().len(), 1);
}
