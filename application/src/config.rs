//! [`Config`]-related definitions.

use std::{env, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::Debug;
use secrecy::SecretString;
use serde::Deserialize;
use service::infra::vision::openai;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Vision model configuration.
    pub vision: Vision,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Room photo analysis configuration.
    pub analysis: Analysis,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service {
            analysis: Analysis { timeout },
        } = value;
        Self {
            analysis: service::command::analyze_room::Config { timeout },
        }
    }
}

/// Room photo analysis configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Analysis {
    /// Maximum time to wait for a photo description, after which the
    /// fallback estimate is used.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

/// Vision model configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Vision {
    /// API key of the vision model.
    ///
    /// Taken from the `OPENAI_API_KEY` environment variable if not set.
    #[debug(skip)]
    pub api_key: Option<String>,

    /// URL of the chat completions endpoint.
    #[default("https://api.openai.com/v1/chat/completions".to_owned())]
    pub endpoint: String,

    /// Name of the model to use.
    #[default("gpt-4o".to_owned())]
    pub model: String,

    /// Maximum number of tokens in a photo description.
    #[default(500)]
    pub max_tokens: u32,

    /// Timeout of a single request to the vision model.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Vision> for openai::Config {
    fn from(value: Vision) -> Self {
        let Vision {
            api_key,
            endpoint,
            model,
            max_tokens,
            timeout,
        } = value;

        Self {
            api_key: api_key
                .or_else(|| env::var(Self::API_KEY_VAR).ok())
                .filter(|k| !k.trim().is_empty())
                .map(SecretString::from),
            endpoint,
            model,
            max_tokens,
            timeout,
        }
    }
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[debug(skip)]
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use secrecy::ExposeSecret as _;
    use service::infra::vision::openai;

    use super::{Config, Vision};

    #[test]
    fn defaults_without_file() {
        let conf = Config::new("definitely-missing.toml").unwrap();

        assert_eq!(conf.server.port, 8080);
        assert_eq!(conf.service.analysis.timeout, Duration::from_secs(30));
        assert_eq!(conf.vision.model, "gpt-4o");
        assert_eq!(conf.vision.max_tokens, 500);
        assert_eq!(conf.postgres.dbname, "postgres");
    }

    #[test]
    fn converts_vision_config() {
        let conf = openai::Config::from(Vision {
            api_key: Some("sk-test".into()),
            model: "gpt-4o-mini".into(),
            timeout: Duration::from_secs(5),
            ..Vision::default()
        });

        assert_eq!(
            conf.api_key.as_ref().map(|k| k.expose_secret().to_owned()),
            Some("sk-test".into()),
        );
        assert_eq!(conf.model, "gpt-4o-mini");
        assert_eq!(conf.timeout, Duration::from_secs(5));
        assert_eq!(
            conf.endpoint,
            "https://api.openai.com/v1/chat/completions",
        );
    }

    #[test]
    fn hides_secrets_in_debug() {
        let vision = Vision {
            api_key: Some("sk-very-secret".into()),
            ..Vision::default()
        };

        assert!(!format!("{vision:?}").contains("sk-very-secret"));
    }
}
