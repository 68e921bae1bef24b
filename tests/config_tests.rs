use campus_portal::config::{AppConfig, Env};
use serial_test::serial;

// These tests mutate process environment variables, so they are serialized.
// `set_var`/`remove_var` are unsafe in edition 2024 because the process
// environment is global state; that is exactly why `#[serial]` is required.

fn clear_env() {
    for key in [
        "APP_ENV",
        "PORT",
        "SESSION_SECRET",
        "CHAT_API_KEY",
        "CHAT_API_URL",
        "CHAT_MODEL",
    ] {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
#[serial]
fn test_default_config_is_usable_without_env() {
    let config = AppConfig::default();

    assert_eq!(config.port, 3000);
    assert_eq!(config.env, Env::Local);
    assert!(config.session_secret.len() >= 32);
    assert!(config.chat_api_url.contains("chat/completions"));
}

#[test]
#[serial]
fn test_load_falls_back_to_local_defaults() {
    clear_env();

    let config = AppConfig::load();

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.port, 3000);
    assert!(config.session_secret.len() >= 32);
    assert_eq!(config.chat_model, "gpt-3.5-turbo");
}

#[test]
#[serial]
fn test_load_honors_port_and_chat_overrides() {
    clear_env();
    unsafe {
        std::env::set_var("PORT", "8081");
        std::env::set_var("CHAT_MODEL", "gpt-4o-mini");
        std::env::set_var("CHAT_API_URL", "http://localhost:9999/v1/chat/completions");
    }

    let config = AppConfig::load();

    assert_eq!(config.port, 8081);
    assert_eq!(config.chat_model, "gpt-4o-mini");
    assert_eq!(
        config.chat_api_url,
        "http://localhost:9999/v1/chat/completions"
    );

    clear_env();
}

#[test]
#[serial]
fn test_load_production_with_explicit_secrets() {
    clear_env();
    unsafe {
        std::env::set_var("APP_ENV", "production");
        std::env::set_var(
            "SESSION_SECRET",
            "a-production-session-secret-of-sufficient-length",
        );
        std::env::set_var("CHAT_API_KEY", "sk-prod-key");
    }

    let config = AppConfig::load();

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.chat_api_key, "sk-prod-key");

    clear_env();
}
