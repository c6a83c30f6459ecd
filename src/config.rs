use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::ranking::DEFAULT_TOP_K;

pub const DEFAULT_MODEL_DIR: &str = "models";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_PORT: u16 = 3000;

/// Runtime settings shared by the binaries
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisorConfig {
    pub model_dir: PathBuf,
    pub debounce: Duration,
    pub top_k: usize,
    pub port: u16,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            top_k: DEFAULT_TOP_K,
            port: DEFAULT_PORT,
        }
    }
}

impl AdvisorConfig {
    /// Read settings from the process environment (and `.env` if present)
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let model_dir = lookup("CROP_MODEL_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));

        let debounce_ms: u64 = parse_or(&lookup, "CROP_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);

        let top_k = match parse_or(&lookup, "CROP_TOP_K", DEFAULT_TOP_K) {
            0 => {
                tracing::warn!("CROP_TOP_K must be at least 1, using {}", DEFAULT_TOP_K);
                DEFAULT_TOP_K
            }
            k => k,
        };

        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);

        Self {
            model_dir,
            debounce: Duration::from_millis(debounce_ms),
            top_k,
            port,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display + Copy,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}='{}', using {}", key, raw, default);
            default
        }),
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AdvisorConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AdvisorConfig::default());
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_overrides() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("CROP_MODEL_DIR", "/srv/models"),
            ("CROP_DEBOUNCE_MS", "250"),
            ("CROP_TOP_K", "5"),
            ("PORT", "8080"),
        ]));
        assert_eq!(config.model_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.top_k, 5);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AdvisorConfig::from_lookup(lookup(&[
            ("CROP_DEBOUNCE_MS", "soon"),
            ("CROP_TOP_K", "0"),
            ("PORT", "99999"),
            ("CROP_MODEL_DIR", "  "),
        ]));
        assert_eq!(config, AdvisorConfig::default());
    }
}
