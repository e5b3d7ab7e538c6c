use httptest::matchers::*;
use httptest::responders::*;
use httptest::{Expectation, Server, all_of};
use serde_json::{Value, json};
use shifttrack::api::{Endpoint, Payload, WebhookClient};
use shifttrack::core::auth::{AuthLogic, Credentials, Registration};
use shifttrack::core::location::{FixedLocation, LocationProvider, NoLocation};
use shifttrack::core::reports::ReportLogic;
use shifttrack::core::shift::{ShiftInput, ShiftLogic};
use shifttrack::core::users::{UserLogic, UserUpdate};
use shifttrack::errors::AppError;
use shifttrack::models::{GeoPoint, User};
use shifttrack::session::{MemorySessionStore, Session};
use shifttrack::utils::time::DisplayZone;
use std::time::Duration;

mod common;
use common::client_for;

fn creds() -> Credentials {
    Credentials {
        email: "ana@example.com".into(),
        password: "secret".into(),
    }
}

fn admin() -> User {
    User {
        id: "7".into(),
        name: "Ana Admin".into(),
        email: "ana@example.com".into(),
        role: "Admin".into(),
        avatar: None,
        phone: None,
    }
}

fn logged_in() -> Session<MemorySessionStore> {
    let mut session = Session::new(MemorySessionStore::new());
    session.set_current_user(&admin()).unwrap();
    session
}

fn input(point: Option<GeoPoint>, comment: &str) -> ShiftInput {
    let locator: Box<dyn LocationProvider> = match point {
        Some(p) => Box::new(FixedLocation(p)),
        None => Box::new(NoLocation),
    };
    ShiftInput {
        comment: Some(comment.into()),
        locator,
        locate_timeout: Duration::from_secs(1),
    }
}

#[test]
fn test_every_body_carries_the_account_field() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-cargadeinformacion"),
            request::body(json_decoded(|b: &Value| {
                b["id_subcuenta"] == "acc-1" && b["email"] == "ana@example.com"
            })),
        ])
        .respond_with(json_encoded(json!({ "ok": true }))),
    );

    let client = client_for(&server);
    let mut body = Payload::new();
    body.insert("email".into(), json!("ana@example.com"));
    assert_eq!(client.post(Endpoint::Profile, body).unwrap(), json!({ "ok": true }));
}

#[test]
fn test_login_builds_user_from_aliases() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-login"),
            request::body(json_decoded(|b: &Value| {
                b["email"] == "ana@example.com" && b["password"] == "secret"
            })),
        ])
        .respond_with(json_encoded(json!([
            { "json": { "id": 7, "nombre": "Ana Admin", "email": "ana@example.com", "rol": "Admin" } }
        ]))),
    );

    let mut session = Session::new(MemorySessionStore::new());
    let user = AuthLogic::login(&client_for(&server), &mut session, &creds()).unwrap();
    assert_eq!(user.id, "7");
    assert_eq!(user.name, "Ana Admin");
    assert_eq!(user.role, "Admin");
    assert_eq!(session.current_user().unwrap(), Some(user));
    assert_eq!(session.repository().audit_log[0].0, "login");
}

#[test]
fn test_login_fallbacks_for_sparse_record() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/webhook/ShiftTrack-login"))
            .respond_with(json_encoded(json!({ "success": true }))),
    );

    let mut session = Session::new(MemorySessionStore::new());
    let user = AuthLogic::login(&client_for(&server), &mut session, &creds()).unwrap();
    assert_eq!(user.name, "ana");
    assert_eq!(user.email, "ana@example.com");
    assert_eq!(user.role, "User");
    assert!(user.id.parse::<i64>().is_ok());
}

#[test]
fn test_login_with_empty_reply_is_incomplete() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/webhook/ShiftTrack-login"))
            .times(2)
            .respond_with(httptest::responders::cycle![
                status_code(200).body(""),
                json_encoded(json!([])),
            ]),
    );

    let client = client_for(&server);
    let mut session = Session::new(MemorySessionStore::new());
    for _ in 0..2 {
        let res = AuthLogic::login(&client, &mut session, &creds());
        assert!(matches!(res, Err(AppError::IncompleteResponse)));
    }
    assert!(session.current_user().unwrap().is_none());
}

#[test]
fn test_remote_error_message_is_surfaced() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/webhook/ShiftTrack-login"))
            .respond_with(json_encoded(
                json!({ "status": "error", "message": "Invalid credentials" }),
            )),
    );

    let mut session = Session::new(MemorySessionStore::new());
    let err = AuthLogic::login(&client_for(&server), &mut session, &creds()).unwrap_err();
    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(session.current_user().unwrap().is_none());
}

#[test]
fn test_missing_fields_never_reach_the_gateway() {
    let client = WebhookClient::builder()
        .base("http://127.0.0.1:9")
        .build()
        .unwrap();
    let mut session = Session::new(MemorySessionStore::new());
    let res = AuthLogic::login(
        &client,
        &mut session,
        &Credentials {
            email: " ".into(),
            password: "x".into(),
        },
    );
    assert!(matches!(res, Err(AppError::MissingField("email"))));
}

#[test]
fn test_transport_failure_has_generic_message() {
    let client = WebhookClient::builder()
        .base("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let mut session = Session::new(MemorySessionStore::new());
    let err = AuthLogic::login(&client, &mut session, &creds()).unwrap_err();
    assert!(matches!(err, AppError::Http(_)));
    assert_eq!(err.user_message(), "Connection error with the server.");
}

#[test]
fn test_register_keeps_existing_session_user() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-registro"),
            request::body(json_decoded(|b: &Value| {
                b["role"] == "User" && b["name"] == "Bruno" && b.get("phone").is_none()
            })),
        ])
        .respond_with(status_code(200).body("")),
    );

    let mut session = logged_in();
    let reg = Registration {
        name: "Bruno".into(),
        email: "bruno@example.com".into(),
        password: "pw".into(),
        role: None,
        phone: None,
    };
    let user = AuthLogic::register(&client_for(&server), &mut session, &reg).unwrap();
    assert_eq!(user.email, "bruno@example.com");
    assert_eq!(session.current_user().unwrap(), Some(admin()));
}

#[test]
fn test_start_then_end_shift() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-horadeinicio"),
            request::body(json_decoded(|b: &Value| {
                b["user_id"] == "7"
                    && b["email"] == "ana@example.com"
                    && b["latitude"] == 40.5
                    && b["longitude"] == -3.5
                    && b["comentario_inicio"] == "morning"
                    && b["timestamp_start"].as_str().is_some_and(|t| t.ends_with('Z'))
            })),
        ])
        .respond_with(json_encoded(json!({ "ok": true }))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-horafinal"),
            request::body(json_decoded(|b: &Value| {
                b["userId"] == "7"
                    && b["userName"] == "Ana Admin"
                    && b["status"] == "completed"
                    && b["timezone"] == "America/New_York"
                    && b["duration"] == "00:00:00"
                    && b["latitude_end"].is_null()
                    && b["comentario_final"] == "bye"
            })),
        ])
        .respond_with(json_encoded(json!({ "ok": true }))),
    );

    let client = client_for(&server);
    let zone = DisplayZone::default();
    let mut session = logged_in();

    let point = GeoPoint::new(40.5, -3.5).unwrap();
    let started = ShiftLogic::start(&client, &mut session, &zone, input(Some(point), "morning"))
        .unwrap();
    assert_eq!(started.location, Some(point));
    assert_eq!(session.active_shift().unwrap(), Some(started.marker.clone()));

    // a second start is refused locally
    let again = ShiftLogic::start(&client, &mut session, &zone, input(None, "again"));
    assert!(matches!(again, Err(AppError::ShiftAlreadyActive(_))));

    let summary = ShiftLogic::end(&client, &mut session, &zone, input(None, "bye")).unwrap();
    assert_eq!(summary.start_time, started.marker.display_time);
    assert!(session.active_shift().unwrap().is_none());

    let none = ShiftLogic::end(&client, &mut session, &zone, input(None, ""));
    assert!(matches!(none, Err(AppError::NoActiveShift)));
}

#[test]
fn test_failed_start_leaves_no_marker() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("POST", "/webhook/ShiftTrack-horadeinicio"))
            .respond_with(json_encoded(json!({ "error": true }))),
    );

    let mut session = logged_in();
    let err = ShiftLogic::start(
        &client_for(&server),
        &mut session,
        &DisplayZone::default(),
        input(None, ""),
    )
    .unwrap_err();
    assert_eq!(err.user_message(), "The server reported an error.");
    assert!(session.active_shift().unwrap().is_none());
}

#[test]
fn test_shift_requires_login() {
    let client = WebhookClient::builder()
        .base("http://127.0.0.1:9")
        .build()
        .unwrap();
    let mut session = Session::new(MemorySessionStore::new());
    let res = ShiftLogic::start(&client, &mut session, &DisplayZone::default(), input(None, ""));
    assert!(matches!(res, Err(AppError::NotLoggedIn)));
}

#[test]
fn test_role_gate() {
    let session = logged_in();
    assert!(AuthLogic::require_role(&session, "admin").is_ok());
    assert!(matches!(
        AuthLogic::require_role(&session, "Supervisor"),
        Err(AppError::Forbidden(_))
    ));
}

#[test]
fn test_reports_are_normalized_and_sorted() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-cargadedatos"),
            request::body(json_decoded(|b: &Value| b["request"] == "get_all")),
        ])
        .respond_with(json_encoded(json!({
            "data": [
                { "json": { "id": "old", "nombre": "Ana", "fecha": "2025-01-10T08:00:00", "status": "closed" } },
                { "id": "new", "user_name": "Bruno", "start_time": "2025-01-12T08:00:00" }
            ]
        }))),
    );

    let shifts = ReportLogic::fetch_all(&client_for(&server), &DisplayZone::default()).unwrap();
    let ids: Vec<&str> = shifts.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
    assert!(shifts[0].is_in_progress);
    assert!(!shifts[1].is_in_progress);
}

#[test]
fn test_user_admin_operations() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-cargarusuario"),
            request::body(json_decoded(|b: &Value| b["request"] == "get_all_users")),
        ])
        .respond_with(json_encoded(json!({
            "users": [
                { "id": "1", "nombre": "Ana", "email": "ana@example.com", "rol": "Admin" },
                { "email": "carla@example.com" }
            ]
        }))),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-eliminarusuario"),
            request::body(json_decoded(|b: &Value| {
                b["action"] == "delete" && b["id"] == "u-1"
            })),
        ])
        .respond_with(status_code(500)),
    );
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/webhook/ShiftTrack-editarusuario"),
            request::body(json_decoded(|b: &Value| {
                b["id"] == "1"
                    && b["user_id"] == "1"
                    && b["role"] == "Supervisor"
                    && b["name"] == "Ana"
                    && b.get("password").is_none()
            })),
        ])
        .respond_with(status_code(200)),
    );

    let client = client_for(&server);
    let users = UserLogic::list(&client).unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].id, "u-1");
    assert_eq!(users[1].role, "Analyst");

    let carla = UserLogic::find(&users, "CARLA@example.com").unwrap();
    let err = UserLogic::delete(&client, carla).unwrap_err();
    assert_eq!(err.user_message(), "Could not delete the user. Try again.");

    let ana = UserLogic::find(&users, "1").unwrap();
    let changes = UserUpdate {
        role: Some("Supervisor".into()),
        password: Some("   ".into()),
        ..Default::default()
    };
    let updated = UserLogic::update(&client, ana, &changes).unwrap();
    assert_eq!(updated.role, "Supervisor");

    assert!(matches!(
        UserLogic::find(&users, "nobody"),
        Err(AppError::UserNotFound(_))
    ));
}

#[test]
fn test_profile_prefers_remote_avatar() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path(
            "POST",
            "/webhook/ShiftTrack-cargadeinformacion",
        ))
        .respond_with(json_encoded(json!([
            { "telefono": "555-0101", "avatar": "https://cdn.example.com/ana.png" }
        ]))),
    );

    let profile = UserLogic::profile(&client_for(&server), &admin()).unwrap();
    assert_eq!(profile.name, "Ana Admin");
    assert_eq!(profile.phone.as_deref(), Some("555-0101"));
    assert_eq!(profile.avatar_url(), "https://cdn.example.com/ana.png");
}
