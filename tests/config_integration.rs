use campaign_brief_chat::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;

const BIN: &str = "campaign-brief-chat";

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("CAMPAIGN_SERVER__PORT");
        env::remove_var("CAMPAIGN_CHAT__REPLY_DELAY_MS");
        env::remove_var("CAMPAIGN_AUTH__EMAIL");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("REPLY_DELAY_MS");
        env::remove_var("LOG_JSON");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.auth.email, "demo@marketingai.com");
    assert_eq!(config.auth.password, "demo123");
    assert_eq!(config.auth.redirect_delay_secs, 1);
    assert_eq!(config.chat.reply_delay_ms, 1500);
    assert_eq!(config.chat.seed, None);
    assert!(!config.log.json);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("CAMPAIGN_SERVER__PORT", "9090");
        env::set_var("CAMPAIGN_AUTH__EMAIL", "team@example.com");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.auth.email, "team@example.com");

    clear_env_vars();
}

#[test]
#[serial]
fn test_env_override_nested_key() {
    clear_env_vars();
    unsafe {
        env::set_var("CAMPAIGN_CHAT__REPLY_DELAY_MS", "42");
    }

    let config = AppConfig::load_from_args([BIN]).expect("Failed to load config");
    assert_eq!(config.chat.reply_delay_ms, 42);

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("CAMPAIGN_CHAT__REPLY_DELAY_MS", "900");
    }

    let config = AppConfig::load_from_args([BIN, "--reply-delay-ms", "10"])
        .expect("Failed to load config");
    assert_eq!(config.chat.reply_delay_ms, 10);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp config");
    writeln!(
        file,
        "server:\n  port: 7070\nchat:\n  reply_delay_ms: 250\n  seed: 42"
    )
    .expect("Failed to write temp config");

    let path = file.path().to_str().expect("utf-8 temp path").to_string();
    let config =
        AppConfig::load_from_args([BIN, "--config", path.as_str()]).expect("Failed to load config");

    assert_eq!(config.server.port, 7070);
    assert_eq!(config.chat.reply_delay_ms, 250);
    assert_eq!(config.chat.seed, Some(42));
    // untouched keys keep their defaults
    assert_eq!(config.auth.password, "demo123");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args([BIN, "--config", "does/not/exist.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let cwd_path = "config.yaml";
    fs::write(cwd_path, "server:\n  port: 6060\n").expect("Failed to write ./config.yaml");

    let config = AppConfig::load_from_args([BIN]);

    fs::remove_file(cwd_path).expect("Failed to remove ./config.yaml");

    assert_eq!(config.expect("Failed to load config").server.port, 6060);
}
