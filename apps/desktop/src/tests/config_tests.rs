use super::*;

use std::collections::HashMap;

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/items.db"),
        "sqlite://./data/items.db"
    );
}

#[test]
fn keeps_full_urls_and_memory_databases() {
    assert_eq!(
        normalize_database_url("sqlite://items.db?mode=rwc"),
        "sqlite://items.db?mode=rwc"
    );
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn single_colon_sqlite_prefix_becomes_double_slash() {
    assert_eq!(
        normalize_database_url("sqlite:data\\items.db"),
        "sqlite://data/items.db"
    );
}

#[test]
fn blank_database_url_falls_back_to_default() {
    assert_eq!(normalize_database_url("   "), Settings::default().database_url);
}

#[test]
fn missing_config_file_yields_defaults() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let settings = load_settings(&temp_root.path().join("absent.toml")).expect("settings");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn config_file_overrides_defaults() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join(CONFIG_FILE);
    fs::write(
        &path,
        "database_url = \"sqlite://movies/list.db\"\nlog_filter = \"debug\"\n",
    )
    .expect("write config");

    let mut settings = Settings::default();
    apply_file(&mut settings, &fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(settings.database_url, "sqlite://movies/list.db");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn malformed_config_file_is_an_error() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let path = temp_root.path().join(CONFIG_FILE);
    fs::write(&path, "database_url = [").expect("write config");

    let err = load_settings(&path).expect_err("malformed");
    assert!(err.to_string().contains("invalid config file"));
}

#[test]
fn app_prefixed_env_wins_over_plain_database_url() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DATABASE_URL", "sqlite://plain.db"),
        ("APP__DATABASE_URL", "sqlite://prefixed.db"),
        ("APP__LOG_FILTER", "client_core=debug"),
    ]);

    let mut settings = Settings::default();
    apply_env(&mut settings, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(settings.database_url, "sqlite://prefixed.db");
    assert_eq!(settings.log_filter, "client_core=debug");
}

#[test]
fn absent_env_leaves_settings_untouched() {
    let mut settings = Settings::default();
    apply_env(&mut settings, |_| None);
    assert_eq!(settings, Settings::default());
}
