use anyhow::Context;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILE: &str = "creditsea.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, no trailing slash
    pub api_url: String,
    /// Per-request timeout; `None` leaves the HTTP client's default
    pub http_timeout: Option<Duration>,
    /// Where the interactive client writes its log
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("CREDITSEA_API_URL")
            .or_else(|| get("VITE_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = normalize_base_url(&api_url)?;

        let http_timeout = match get("CREDITSEA_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("CREDITSEA_HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}", raw)
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let log_file = get("CREDITSEA_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Self { api_url, http_timeout, log_file })
    }

    /// Command-line override of the base URL
    pub fn with_api_url(mut self, url: &str) -> anyhow::Result<Self> {
        self.api_url = normalize_base_url(url)?;
        Ok(self)
    }
}

fn normalize_base_url(url: &str) -> anyhow::Result<String> {
    let url = url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("API URL must start with http:// or https://, got {:?}", url);
    }
    Ok(url.trim_end_matches('/').to_string())
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
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_api_url_precedence_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("CREDITSEA_API_URL", "https://api.example.com/"),
            ("VITE_API_URL", "http://ignored:1"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://api.example.com");

        let config = Config::from_lookup(lookup(&[("VITE_API_URL", "http://vite:4000")])).unwrap();
        assert_eq!(config.api_url, "http://vite:4000");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = Config::from_lookup(lookup(&[("CREDITSEA_API_URL", "  ")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(Config::from_lookup(lookup(&[("CREDITSEA_API_URL", "ftp://x")])).is_err());
        assert!(Config::default().with_api_url("localhost:5000").is_err());
    }

    #[test]
    fn test_timeout_and_log_file() {
        let config = Config::from_lookup(lookup(&[
            ("CREDITSEA_HTTP_TIMEOUT_SECS", "15"),
            ("CREDITSEA_LOG_FILE", "/tmp/cs.log"),
        ]))
        .unwrap();
        assert_eq!(config.http_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.log_file, PathBuf::from("/tmp/cs.log"));

        assert!(Config::from_lookup(lookup(&[("CREDITSEA_HTTP_TIMEOUT_SECS", "soon")])).is_err());
    }
}
