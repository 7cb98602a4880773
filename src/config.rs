use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Config file picked up from the working directory when none is given.
const CWD_CONFIG_FILE: &str = "config.yaml";

/// Prefix for environment overrides, e.g. `CAMPAIGN_SERVER__PORT=8000`.
const ENV_PREFIX: &str = "CAMPAIGN";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Artificial delay before the assistant reply, in milliseconds
    #[arg(long, env = "REPLY_DELAY_MS")]
    pub reply_delay_ms: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub chat: ChatConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// The single accepted credential pair and the post-login pacing.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
    pub redirect_delay_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
    /// Fixed seed for campaign selection. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub json: bool,
}

impl ChatConfig {
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("auth.email", "demo@marketingai.com")?
            .set_default("auth.password", "demo123")?
            .set_default("auth.redirect_delay_secs", 1)?
            .set_default("chat.reply_delay_ms", 1500)?
            .set_default("log.json", false)?;

        // An explicit file must exist; the working-directory fallback is optional.
        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path).required(true));
        } else if Path::new(CWD_CONFIG_FILE).exists() {
            builder = builder.add_source(File::with_name(CWD_CONFIG_FILE).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // clap already folded PORT / REPLY_DELAY_MS / LOG_JSON into these.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(delay) = cli.reply_delay_ms {
            builder = builder.set_override("chat.reply_delay_ms", delay)?;
        }
        if let Some(json) = cli.log_json {
            builder = builder.set_override("log.json", json)?;
        }

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_port_override() {
        let config = AppConfig::load_from_args(["campaign-brief-chat", "--port", "4100"])
            .expect("config should load");
        assert_eq!(config.server.port, 4100);
    }

    #[test]
    fn test_reply_delay_duration() {
        let chat = ChatConfig {
            reply_delay_ms: 1500,
            seed: None,
        };
        assert_eq!(chat.reply_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_unknown_flag_is_config_error() {
        let err = AppConfig::load_from_args(["campaign-brief-chat", "--nope"]).unwrap_err();
        assert!(matches!(err, config::ConfigError::Message(_)));
    }
}
