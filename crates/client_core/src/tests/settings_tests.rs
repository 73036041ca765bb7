use super::*;

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("empresas_settings_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn reads_flat_keys_from_settings_file() {
    let path = temp_file(
        "backoffice.toml",
        concat!(
            "api_base_url = \"https://erp.example.com/backoffice\"\n",
            "auth_token = \"abc\"\n",
            "rows_per_page = 50\n",
        ),
    );

    let mut settings = ClientSettings::default();
    apply_file(&mut settings, &fs::read_to_string(&path).expect("read")).expect("parse");

    assert_eq!(settings.api_base_url, "https://erp.example.com/backoffice");
    assert_eq!(settings.auth_token.as_deref(), Some("abc"));
    assert_eq!(settings.rows_per_page, 50);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn explicit_missing_file_is_an_error() {
    let missing = env::temp_dir().join("empresas_settings_definitely_missing.toml");
    assert!(load_settings(Some(missing.as_path())).is_err());
}

#[test]
fn app_prefixed_environment_wins() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("BACKOFFICE_API_URL", "http://short:1"),
        ("APP__API_BASE_URL", "http://long:2"),
        ("BACKOFFICE_TOKEN", "   "),
        ("APP__ROWS_PER_PAGE", "10"),
    ]);
    let mut settings = ClientSettings {
        auth_token: Some("from-file".into()),
        ..ClientSettings::default()
    };

    apply_overrides(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.api_base_url, "http://long:2");
    assert_eq!(settings.auth_token, None);
    assert_eq!(settings.rows_per_page, 10);
}

#[test]
fn unsupported_rows_per_page_falls_back_to_default() {
    assert_eq!(parse_rows_per_page("30"), DEFAULT_ROWS_PER_PAGE);
    assert_eq!(parse_rows_per_page("abc"), DEFAULT_ROWS_PER_PAGE);
    assert_eq!(parse_rows_per_page(" 50 "), 50);
}

#[test]
fn base_url_gets_trailing_slash_and_rejects_other_schemes() {
    let url = parse_base_url("https://erp.example.com/backoffice").expect("url");
    assert_eq!(
        url.join("api/empresas").expect("join").as_str(),
        "https://erp.example.com/backoffice/api/empresas"
    );
    assert!(parse_base_url("ftp://erp.example.com").is_err());
    assert!(parse_base_url("not a url").is_err());
}

#[test]
fn login_redirect_resolves_against_api_host() {
    let settings = ClientSettings {
        api_base_url: "https://erp.example.com/backoffice".into(),
        ..ClientSettings::default()
    };
    assert_eq!(
        settings.login_url().expect("login url").as_str(),
        "https://erp.example.com/"
    );

    let external = ClientSettings {
        login_redirect: "https://sso.example.com/login".into(),
        ..settings
    };
    assert_eq!(
        external.login_url().expect("login url").as_str(),
        "https://sso.example.com/login"
    );
}
