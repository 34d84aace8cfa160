use crate::infrastructure::itunes::{DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_URL};
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;
use wedding_errors::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// `None` runs on the in-memory stores.
    pub database_url: Option<String>,
    pub admin_token: String,
    pub itunes_search_url: url::Url,
    pub search_limit: u32,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_token = lookup("ADMIN_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Internal("ADMIN_TOKEN must be set".to_string()))?;

        Ok(Self {
            bind_addr: try_load(&lookup, "BIND_ADDR", "0.0.0.0:3000")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            admin_token,
            itunes_search_url: try_load(&lookup, "ITUNES_SEARCH_URL", DEFAULT_SEARCH_URL)?,
            search_limit: try_load(&lookup, "SEARCH_LIMIT", &DEFAULT_SEARCH_LIMIT.to_string())?,
            secure_cookies: try_load(&lookup, "SECURE_COOKIES", "true")?,
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| AppError::Internal(format!("Invalid {key} value '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[("ADMIN_TOKEN", "s3cret")])).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.database_url, None);
        assert_eq!(config.search_limit, 8);
        assert!(config.secure_cookies);
        assert_eq!(config.itunes_search_url.as_str(), DEFAULT_SEARCH_URL);
    }

    #[test]
    fn test_admin_token_is_required() {
        assert!(Config::from_lookup(lookup(&[])).is_err());
        assert!(Config::from_lookup(lookup(&[("ADMIN_TOKEN", "  ")])).is_err());
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("ADMIN_TOKEN", "s3cret"),
            ("SEARCH_LIMIT", "lots"),
        ]));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ADMIN_TOKEN", "s3cret"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DATABASE_URL", "postgres://localhost/wedding"),
            ("SECURE_COOKIES", "false"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/wedding"));
        assert!(!config.secure_cookies);
    }
}
