// config.rs - Environment configuration for the e2e suite
//
// Everything the suite needs comes from the environment (or a .env file):
//   POSTGRES_URI / DATABASE_URL   database holding the `skill` table
//   API_BASE_URL                  skills API under test
//   API_TOKEN                     sent as `Authorization: token <value>`
//   E2E_FIXTURE_POLICY            strict | lenient
//   E2E_POLL_TIMEOUT_MS           how long to wait for an accepted write
//   E2E_POLL_INTERVAL_MS          delay between polls

use std::env;
use std::time::Duration;

use crate::error::{E2eError, Result};
use crate::fixtures::FailurePolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8910";
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Settings for one e2e run
#[derive(Debug, Clone)]
pub struct E2eConfig {
    pub database_url: String,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub fixture_policy: FailurePolicy,
    pub poll: PollSettings,
}

/// Bounds for waiting on asynchronously processed writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_POLL_TIMEOUT,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl E2eConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("POSTGRES_URI")
            .or_else(|| get("DATABASE_URL"))
            .ok_or(E2eError::MissingEnv("POSTGRES_URI"))?;

        let api_base_url = get("API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let fixture_policy = match get("E2E_FIXTURE_POLICY") {
            Some(raw) => raw.parse()?,
            None => FailurePolicy::default(),
        };

        let poll = PollSettings {
            timeout: parse_millis(&get, "E2E_POLL_TIMEOUT_MS")?.unwrap_or(DEFAULT_POLL_TIMEOUT),
            interval: parse_millis(&get, "E2E_POLL_INTERVAL_MS")?
                .unwrap_or(DEFAULT_POLL_INTERVAL),
        };

        Ok(Self {
            database_url,
            api_base_url,
            api_token: get("API_TOKEN"),
            fixture_policy,
            poll,
        })
    }
}

fn parse_millis<G>(get: &G, name: &'static str) -> Result<Option<Duration>>
where
    G: Fn(&str) -> Option<String>,
{
    get(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| E2eError::InvalidConfig {
                    name,
                    reason: e.to_string(),
                })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = E2eConfig::from_lookup(lookup(&[("POSTGRES_URI", "postgres://localhost/skill")]))
            .unwrap();

        assert_eq!(config.database_url, "postgres://localhost/skill");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api_token, None);
        assert_eq!(config.fixture_policy, FailurePolicy::Strict);
        assert_eq!(config.poll, PollSettings::default());
    }

    #[test]
    fn test_database_url_fallback() {
        let config =
            E2eConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://fallback/db")])).unwrap();
        assert_eq!(config.database_url, "postgres://fallback/db");
    }

    #[test]
    fn test_postgres_uri_wins_over_database_url() {
        let config = E2eConfig::from_lookup(lookup(&[
            ("POSTGRES_URI", "postgres://primary/db"),
            ("DATABASE_URL", "postgres://fallback/db"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://primary/db");
    }

    #[test]
    fn test_missing_database_url() {
        let err = E2eConfig::from_lookup(lookup(&[("API_TOKEN", "abc")])).unwrap_err();
        assert!(matches!(err, E2eError::MissingEnv("POSTGRES_URI")));
    }

    #[test]
    fn test_full_config() {
        let config = E2eConfig::from_lookup(lookup(&[
            ("POSTGRES_URI", "postgres://localhost/skill"),
            ("API_BASE_URL", "http://api:8080/"),
            ("API_TOKEN", "secret"),
            ("E2E_FIXTURE_POLICY", "lenient"),
            ("E2E_POLL_TIMEOUT_MS", "3000"),
            ("E2E_POLL_INTERVAL_MS", "50"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://api:8080");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.fixture_policy, FailurePolicy::Lenient);
        assert_eq!(config.poll.timeout, Duration::from_millis(3000));
        assert_eq!(config.poll.interval, Duration::from_millis(50));
    }

    #[test]
    fn test_invalid_poll_timeout() {
        let err = E2eConfig::from_lookup(lookup(&[
            ("POSTGRES_URI", "postgres://localhost/skill"),
            ("E2E_POLL_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            E2eError::InvalidConfig {
                name: "E2E_POLL_TIMEOUT_MS",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_token_is_unset() {
        let config = E2eConfig::from_lookup(lookup(&[
            ("POSTGRES_URI", "postgres://localhost/skill"),
            ("API_TOKEN", "  "),
        ]))
        .unwrap();
        assert_eq!(config.api_token, None);
    }
}
