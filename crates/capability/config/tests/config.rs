use relay_config::{AppConfig, ConfigError};
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_with_admin_token_only() {
    let config = AppConfig::from_lookup(lookup(&[("RELAY_ADMIN_TOKEN", "secret")]))
        .expect("config");
    assert_eq!(config.http_addr, "127.0.0.1:3000");
    assert_eq!(config.database_url, None);
    assert_eq!(config.redis_url, None);
    assert_eq!(config.ranking_limit, 100);
    assert_eq!(config.ranking_cache_seconds, 300);
    assert_eq!(config.ratio_match_strategy, "first");
}

#[test]
fn admin_token_is_required() {
    let err = AppConfig::from_lookup(lookup(&[("RELAY_ADMIN_TOKEN", "")])).expect_err("missing");
    assert_eq!(err, ConfigError::Missing("RELAY_ADMIN_TOKEN".to_string()));
}

#[test]
fn overrides_are_parsed() {
    let config = AppConfig::from_lookup(lookup(&[
        ("RELAY_ADMIN_TOKEN", "secret"),
        ("RELAY_HTTP_ADDR", "0.0.0.0:9000"),
        ("RELAY_DATABASE_URL", "postgres://relay@localhost/relay"),
        ("RELAY_RANKING_LIMIT", "20"),
        ("RELAY_RATIO_MATCH_STRATEGY", "Narrowest"),
    ]))
    .expect("config");
    assert_eq!(config.http_addr, "0.0.0.0:9000");
    assert_eq!(
        config.database_url.as_deref(),
        Some("postgres://relay@localhost/relay")
    );
    assert_eq!(config.ranking_limit, 20);
    assert_eq!(config.ratio_match_strategy, "narrowest");
}

#[test]
fn invalid_values_are_rejected() {
    let err = AppConfig::from_lookup(lookup(&[
        ("RELAY_ADMIN_TOKEN", "secret"),
        ("RELAY_RANKING_CACHE_SECONDS", "soon"),
    ]))
    .expect_err("invalid");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "RELAY_RANKING_CACHE_SECONDS"));

    let err = AppConfig::from_lookup(lookup(&[
        ("RELAY_ADMIN_TOKEN", "secret"),
        ("RELAY_RATIO_MATCH_STRATEGY", "random"),
    ]))
    .expect_err("invalid strategy");
    assert!(matches!(err, ConfigError::Invalid(key, _) if key == "RELAY_RATIO_MATCH_STRATEGY"));
}

#[test]
fn load_config_from_env() {
    // Rust 2024 中 set_var 需要显式标注 unsafe（测试进程内可控）。
    unsafe {
        std::env::set_var("RELAY_ADMIN_TOKEN", "env-secret");
        std::env::set_var("RELAY_RANKING_CACHE_SECONDS", "60");
    }
    let config = AppConfig::from_env().expect("config");
    assert_eq!(config.admin_token, "env-secret");
    assert_eq!(config.ranking_cache_seconds, 60);
}
