use super::*;

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header};
use serde::Serialize;
use shared::domain::UserId;

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: i64,
}

fn jwt_expiring_at(exp: i64) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &TestClaims {
            sub: "1".to_string(),
            exp,
        },
        &EncodingKey::from_secret(b"server-side-secret"),
    )
    .expect("encode jwt")
}

fn unique_session_path(label: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("deptadmin_session_{label}_{suffix}"))
        .join("session.json")
}

#[test]
fn file_store_round_trips_under_token_key() {
    let path = unique_session_path("roundtrip");
    let store = FileTokenStore::new(&path);

    assert_eq!(store.load().expect("load empty"), None);
    store.save("abc123").expect("save");

    let raw = fs::read_to_string(&path).expect("read file");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value[TOKEN_KEY], "abc123");
    assert_eq!(store.load().expect("load").as_deref(), Some("abc123"));

    store.clear().expect("clear");
    assert!(!path.exists());
    store.clear().expect("clearing twice is fine");

    if let Some(dir) = path.parent() {
        fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[test]
fn unreadable_session_file_is_treated_as_signed_out() {
    let path = unique_session_path("garbage");
    fs::create_dir_all(path.parent().expect("parent")).expect("dir");
    fs::write(&path, "not json").expect("write");

    let session = Session::start(Box::new(FileTokenStore::new(&path))).expect("start");
    assert!(!session.is_authenticated());

    if let Some(dir) = path.parent() {
        fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[test]
fn authentication_follows_token_presence() {
    let mut session = Session::start(Box::new(MemoryTokenStore::default())).expect("start");
    assert!(!session.is_authenticated());

    session.establish("opaque-token".to_string()).expect("establish");
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("opaque-token"));

    session.remember_user(User {
        id: UserId("u-1".to_string()),
        username: "alice".to_string(),
        created_at: None,
        updated_at: None,
    });
    session.clear().expect("clear");
    assert!(!session.is_authenticated());
    assert!(session.user().is_none());
}

#[test]
fn new_token_drops_the_remembered_user() {
    let mut session = Session::start(Box::new(MemoryTokenStore::default())).expect("start");
    session.remember_user(User {
        id: UserId("u-2".to_string()),
        username: "bob".to_string(),
        created_at: None,
        updated_at: None,
    });

    session.establish("alice-token".to_string()).expect("establish");
    assert_eq!(session.token(), Some("alice-token"));
    assert!(session.user().is_none());
}

#[test]
fn blank_persisted_token_is_not_a_session() {
    let session = Session::start(Box::new(MemoryTokenStore::with_token("  "))).expect("start");
    assert!(!session.is_authenticated());
}

#[test]
fn expired_jwt_is_discarded_at_start() {
    let store = std::sync::Arc::new(MemoryTokenStore::with_token(jwt_expiring_at(1_000)));

    struct Shared(std::sync::Arc<MemoryTokenStore>);
    impl TokenStore for Shared {
        fn load(&self) -> Result<Option<String>> {
            self.0.load()
        }
        fn save(&self, token: &str) -> Result<()> {
            self.0.save(token)
        }
        fn clear(&self) -> Result<()> {
            self.0.clear()
        }
    }

    let session = Session::start(Box::new(Shared(store.clone()))).expect("start");
    assert!(!session.is_authenticated());
    assert_eq!(store.load().expect("load"), None);
}

#[test]
fn unexpired_jwt_and_opaque_tokens_survive_start() {
    let future = chrono::Utc::now().timestamp() + 3_600;
    let session =
        Session::start(Box::new(MemoryTokenStore::with_token(jwt_expiring_at(future))))
            .expect("start");
    assert!(session.is_authenticated());

    assert!(!token_expired("not-a-jwt", 0));
    assert!(token_expired(&jwt_expiring_at(10), 11));
    assert!(!token_expired(&jwt_expiring_at(10), 9));
}
