use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone)]
pub struct StoryConfig {
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub log_level: String,
    /// OTLP collector endpoint; span export is off when unset.
    pub otlp_endpoint: Option<String>,
    pub openai: OpenAiConfig,
    pub swagger_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Absent when `OPENAI_API_KEY` is unset or blank. Requests then fail
    /// with a configuration error instead of the process refusing to start.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: Option<u64>,
}

impl OpenAiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl StoryConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let environment: Environment = env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "dev".to_string())
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;
        let is_prod = environment == Environment::Prod;

        Ok(StoryConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("story-service"), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
            openai: OpenAiConfig {
                api_key: get_optional_env("OPENAI_API_KEY").map(Secret::new),
                base_url: get_env("OPENAI_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL), is_prod)?,
                model: get_env("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL), is_prod)?,
                temperature: get_optional_env("OPENAI_TEMPERATURE")
                    .map(|v| parse_env("OPENAI_TEMPERATURE", &v))
                    .transpose()?
                    .unwrap_or(DEFAULT_TEMPERATURE),
                timeout_secs: get_optional_env("OPENAI_TIMEOUT_SECS")
                    .map(|v| parse_env("OPENAI_TIMEOUT_SECS", &v))
                    .transpose()?,
            },
            swagger_enabled: get_optional_env("ENABLE_SWAGGER")
                .map(|v| parse_bool("ENABLE_SWAGGER", &v))
                .transpose()?
                .unwrap_or(true),
        })
    }

    pub fn is_prod(&self) -> bool {
        self.environment == Environment::Prod
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "test" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            _ => Err(format!("Invalid environment: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

/// Blank values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("Invalid value for {}: {} ({})", key, value, e))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::ConfigError(anyhow::anyhow!(
            "Invalid value for {}: {}",
            key,
            value
        ))),
    }
}
