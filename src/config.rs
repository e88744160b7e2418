/*
 * Responsibility
 * - 起動時に 1 回だけ設定を読み込む (.env → プロセス環境変数)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - 以後 immutable、参照で共有
 */
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: String,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    // HTTP read/write bound, and the drain bound for in-flight connections at shutdown
    pub server_timeout: Duration,
    pub idle_timeout: Duration,

    pub grpc_auth_addr: String,
    pub grpc_db_addr: String,
    pub grpc_retry_max: u32,
    pub grpc_retry_timeout: Duration,

    pub secret_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the signing secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("server_timeout", &self.server_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .field("grpc_auth_addr", &self.grpc_auth_addr)
            .field("grpc_db_addr", &self.grpc_db_addr)
            .field("grpc_retry_max", &self.grpc_retry_max)
            .field("grpc_retry_timeout", &self.grpc_retry_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr = lookup("SERVER_ADDRESS")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "localhost:8080".to_string());

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let server_timeout = duration_or(&lookup, "SERVER_TIMEOUT", Duration::from_secs(10))?;
        let idle_timeout = duration_or(&lookup, "SERVER_IDLE_TIMEOUT", Duration::from_secs(60))?;

        let grpc_auth_addr = required(&lookup, "GRPC_API_AUTH_PORT")?;
        let grpc_db_addr = required(&lookup, "GRPC_API_DB_PORT")?;

        let grpc_retry_max = match lookup("GRPC_RETRY_MAX") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("GRPC_RETRY_MAX"))?,
            None => 4,
        };
        let grpc_retry_timeout =
            duration_or(&lookup, "GRPC_RETRY_TIMEOUT", Duration::from_secs(5))?;

        let secret_key = required(&lookup, "SECRET_KEY")?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            server_timeout,
            idle_timeout,
            grpc_auth_addr,
            grpc_db_addr,
            grpc_retry_max,
            grpc_retry_timeout,
            secret_key,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn duration_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => {
            parse_duration(&raw).ok_or(ConfigError::Invalid(key))
        }
        _ => Ok(default),
    }
}

/// `500ms`, `10s`, `2m`, `1h`, or bare seconds.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (num, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(i) => raw.split_at(i),
        None => (raw, "s"),
    };
    let n: u64 = num.parse().ok()?;

    match unit {
        "ms" => Some(Duration::from_millis(n)),
        "s" => Some(Duration::from_secs(n)),
        "m" => Some(Duration::from_secs(n * 60)),
        "h" => Some(Duration::from_secs(n * 3600)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("GRPC_API_AUTH_PORT", "localhost:44044"),
        ("GRPC_API_DB_PORT", "localhost:44045"),
        ("SECRET_KEY", "s3cret"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();

        assert_eq!(config.addr, "localhost:8080");
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.server_timeout, Duration::from_secs(10));
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
        assert_eq!(config.grpc_retry_max, 4);
        assert_eq!(config.grpc_retry_timeout, Duration::from_secs(5));
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn missing_secret_fails() {
        let err = Config::from_lookup(env(&REQUIRED[..2])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SECRET_KEY"));
    }

    #[test]
    fn missing_backend_fails() {
        let err = Config::from_lookup(env(&REQUIRED[1..])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("GRPC_API_AUTH_PORT"));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend_from_slice(&[
            ("SERVER_ADDRESS", "0.0.0.0:9000"),
            ("SERVER_TIMEOUT", "4s"),
            ("SERVER_IDLE_TIMEOUT", "2m"),
            ("GRPC_RETRY_MAX", "2"),
            ("GRPC_RETRY_TIMEOUT", "750ms"),
            ("APP_ENV", "prod"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]);
        let config = Config::from_lookup(env(&pairs)).unwrap();

        assert_eq!(config.addr, "0.0.0.0:9000");
        assert_eq!(config.server_timeout, Duration::from_secs(4));
        assert_eq!(config.idle_timeout, Duration::from_secs(120));
        assert_eq!(config.grpc_retry_max, 2);
        assert_eq!(config.grpc_retry_timeout, Duration::from_millis(750));
        assert!(config.app_env.is_production());
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("SERVER_TIMEOUT", "ten seconds"));
        assert_eq!(
            Config::from_lookup(env(&pairs)).unwrap_err(),
            ConfigError::Invalid("SERVER_TIMEOUT")
        );

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("GRPC_RETRY_MAX", "0"));
        assert_eq!(
            Config::from_lookup(env(&pairs)).unwrap_err(),
            ConfigError::Invalid("GRPC_RETRY_MAX")
        );
    }

    #[test]
    fn duration_formats() {
        assert_eq!(parse_duration("15"), Some(Duration::from_secs(15)));
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
        assert_eq!(parse_duration("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(parse_duration("1.5s"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn debug_hides_secret() {
        let config = Config::from_lookup(env(REQUIRED)).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
