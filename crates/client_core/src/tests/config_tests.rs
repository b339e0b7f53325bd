use super::*;

use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn temp_settings_file(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("deptadmin_config_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(
        Path::new("/nonexistent/deptadmin.toml"),
        env_from(&[("HOME", "/home/alice"), ("USERPROFILE", "C:/Users/bob")]),
    );
    assert_eq!(settings.graphql_url, DEFAULT_GRAPHQL_URL);
    assert_eq!(
        settings.data_dir,
        dirs::data_local_dir().map(|dir| dir.join("deptadmin"))
    );
    assert_ne!(settings.data_dir, Some(PathBuf::from("C:/Users/bob/.deptadmin")));
    match settings.data_dir.clone() {
        Some(dir) => assert_eq!(
            settings.token_path().expect("token path"),
            dir.join("session.json")
        ),
        None => assert!(matches!(settings.token_path(), Err(ClientError::NoDataDir))),
    }
}

#[test]
fn unresolved_data_dir_is_an_error_until_configured() {
    let settings = ClientSettings {
        graphql_url: DEFAULT_GRAPHQL_URL.into(),
        data_dir: None,
    };
    assert!(matches!(settings.token_path(), Err(ClientError::NoDataDir)));

    let settings = settings.with_overrides(None, Some(PathBuf::from("/srv/deptadmin")));
    assert_eq!(
        settings.token_path().expect("token path"),
        PathBuf::from("/srv/deptadmin/session.json")
    );
}

#[test]
fn file_values_are_overridden_by_environment() {
    let path = temp_settings_file(
        "graphql_url = \"https://file.example/graphql\"\ndata_dir = \"/srv/deptadmin\"\n",
    );

    let from_file = load_settings_from(&path, env_from(&[]));
    assert_eq!(from_file.graphql_url, "https://file.example/graphql");
    assert_eq!(from_file.data_dir, Some(PathBuf::from("/srv/deptadmin")));

    let from_env = load_settings_from(
        &path,
        env_from(&[
            ("GRAPHQL_URL", "https://env.example/graphql"),
            ("APP__GRAPHQL_URL", "https://app.example/graphql"),
            ("DEPTADMIN_DATA_DIR", "/tmp/deptadmin"),
        ]),
    );
    assert_eq!(from_env.graphql_url, "https://app.example/graphql");
    assert_eq!(from_env.data_dir, Some(PathBuf::from("/tmp/deptadmin")));

    if let Some(dir) = path.parent() {
        fs::remove_dir_all(dir).expect("cleanup");
    }
}

#[test]
fn blank_environment_values_are_ignored() {
    let settings = load_settings_from(
        Path::new("/nonexistent/deptadmin.toml"),
        env_from(&[("GRAPHQL_URL", "   "), ("DEPTADMIN_DATA_DIR", " ")]),
    );
    assert_eq!(settings.graphql_url, DEFAULT_GRAPHQL_URL);
    assert_eq!(settings.data_dir, default_data_dir());
}

#[test]
fn endpoint_requires_http_scheme() {
    assert!(parse_endpoint("http://localhost:3000/graphql").is_ok());
    assert!(parse_endpoint("https://api.example.com/graphql").is_ok());

    let err = parse_endpoint("ftp://example.com").expect_err("scheme");
    assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    assert!(parse_endpoint("not a url").is_err());
}

#[test]
fn flags_override_loaded_settings() {
    let settings = ClientSettings {
        graphql_url: DEFAULT_GRAPHQL_URL.into(),
        data_dir: Some(PathBuf::from("/home/alice/.deptadmin")),
    }
    .with_overrides(Some("https://flag.example/graphql".into()), None);
    assert_eq!(settings.graphql_url, "https://flag.example/graphql");
    assert_eq!(settings.data_dir, Some(PathBuf::from("/home/alice/.deptadmin")));

    let unchanged = settings.clone().with_overrides(Some(" ".into()), None);
    assert_eq!(unchanged, settings);
}
