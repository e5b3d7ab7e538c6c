use chrono::{TimeZone, Utc};
use shifttrack::db::log::load_log;
use shifttrack::db::pool::DbPool;
use shifttrack::models::{ActiveSession, User};
use shifttrack::session::{
    MemorySessionStore, Session, SessionKey, SessionRepository, SqliteSessionStore,
};
use shifttrack::utils::time::DisplayZone;

fn user() -> User {
    User {
        id: "42".into(),
        name: "Ana".into(),
        email: "ana@example.com".into(),
        role: "Admin".into(),
        avatar: None,
        phone: Some("555".into()),
    }
}

fn marker() -> ActiveSession {
    let start = Utc.with_ymd_and_hms(2025, 1, 15, 13, 5, 9).unwrap();
    ActiveSession::begin(start, &DisplayZone::default())
}

#[test]
fn test_marker_projections() {
    let m = marker();
    assert_eq!(m.display_time, "08:05:09");
    assert_eq!(m.display_date, "1/15/2025");
    let later = Utc.with_ymd_and_hms(2025, 1, 15, 15, 35, 0).unwrap();
    assert_eq!(m.elapsed_minutes(later), 149);
}

#[test]
fn test_memory_session_round_trip() {
    let mut session = Session::new(MemorySessionStore::new());
    assert!(session.current_user().unwrap().is_none());

    session.set_current_user(&user()).unwrap();
    session.set_active_shift(&marker()).unwrap();
    assert_eq!(session.current_user().unwrap(), Some(user()));
    assert_eq!(session.active_shift().unwrap(), Some(marker()));

    session.clear_active_shift().unwrap();
    assert!(session.active_shift().unwrap().is_none());
    assert!(session.current_user().unwrap().is_some());

    session.set_active_shift(&marker()).unwrap();
    session.logout().unwrap();
    assert!(session.current_user().unwrap().is_none());
    assert!(session.active_shift().unwrap().is_none());
}

#[test]
fn test_unreadable_values_count_as_absent() {
    let mut store = MemorySessionStore::new();
    store.save(SessionKey::CurrentUser, "{not json").unwrap();
    store.save(SessionKey::ActiveShift, "[]").unwrap();

    let session = Session::new(store);
    assert!(session.current_user().unwrap().is_none());
    assert!(session.active_shift().unwrap().is_none());
}

#[test]
fn test_marker_uses_camel_case_keys() {
    let mut session = Session::new(MemorySessionStore::new());
    session.set_active_shift(&marker()).unwrap();

    let raw = session
        .repository()
        .load(SessionKey::ActiveShift)
        .unwrap()
        .unwrap();
    assert!(raw.contains("\"displayTime\":\"08:05:09\""));
    assert!(raw.contains("\"iso\""));
}

#[test]
fn test_sqlite_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.sqlite");
    let path = path.to_str().unwrap();

    {
        let mut session = Session::new(SqliteSessionStore::open(path).unwrap());
        session.set_current_user(&user()).unwrap();
        session.set_active_shift(&marker()).unwrap();
        // upsert keeps a single row per key
        session.set_current_user(&user()).unwrap();
        session.audit("login", "ana@example.com", "Logged in as Ana");
    }

    let session = Session::new(SqliteSessionStore::open(path).unwrap());
    assert_eq!(session.current_user().unwrap(), Some(user()));
    assert_eq!(session.active_shift().unwrap(), Some(marker()));

    let conn = &session.repository().pool().conn;
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM session_store", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 2);

    let log = load_log(conn).unwrap();
    assert!(log.iter().any(|e| e.operation == "login" && e.target == "ana@example.com"));
    // schema migration recorded once across both opens
    assert_eq!(
        log.iter().filter(|e| e.operation == "migration_applied").count(),
        1
    );
}

#[test]
fn test_migration_rows_use_rfc3339_dates() {
    let pool = DbPool::in_memory().unwrap();
    let log = load_log(&pool.conn).unwrap();

    let migration = log
        .iter()
        .find(|e| e.operation == "migration_applied")
        .expect("migration row");
    assert!(chrono::DateTime::parse_from_rfc3339(&migration.date).is_ok());
}

#[test]
fn test_sqlite_logout_clears_both_keys() {
    let pool = DbPool::in_memory().unwrap();
    let mut session = Session::new(SqliteSessionStore::new(pool));
    session.set_current_user(&user()).unwrap();
    session.set_active_shift(&marker()).unwrap();

    session.logout().unwrap();
    assert!(session.current_user().unwrap().is_none());
    assert!(session.active_shift().unwrap().is_none());
}
