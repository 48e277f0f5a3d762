use crate::error::{Result, WeatherError};
use crate::models::cache::DEFAULT_TTL;
use std::time::Duration;

pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_GEO_BASE_URL: &str = "http://api.openweathermap.org";

/// Runtime settings for the OpenWeather client.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub weather_base_url: String,
    pub geo_base_url: String,
    pub cache_ttl: Duration,
    pub http_timeout: Option<Duration>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("weather_base_url", &self.weather_base_url)
            .field("geo_base_url", &self.geo_base_url)
            .field("cache_ttl", &self.cache_ttl)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geo_base_url: DEFAULT_GEO_BASE_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            http_timeout: None,
        }
    }

    /// Reads `WEATHER_API_KEY` plus the optional overrides
    /// `OPENWEATHER_BASE_URL`, `OPENWEATHER_GEO_BASE_URL`,
    /// `WEATHER_CACHE_TTL_SECS` and `WEATHER_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("WEATHER_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(WeatherError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(url) = lookup("OPENWEATHER_BASE_URL") {
            config = config.with_weather_base_url(url);
        }
        if let Some(url) = lookup("OPENWEATHER_GEO_BASE_URL") {
            config = config.with_geo_base_url(url);
        }
        if let Some(secs) = lookup("WEATHER_CACHE_TTL_SECS") {
            config.cache_ttl = parse_secs("WEATHER_CACHE_TTL_SECS", &secs)?;
        }
        if let Some(secs) = lookup("WEATHER_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Some(parse_secs("WEATHER_HTTP_TIMEOUT_SECS", &secs)?);
        }

        Ok(config)
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_geo_base_url(mut self, url: impl Into<String>) -> Self {
        self.geo_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Points both endpoints at one host, e.g. a mock server.
    pub fn with_base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.with_weather_base_url(url.clone()).with_geo_base_url(url)
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| WeatherError::InvalidConfig(format!("{}={:?}: {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));

        let result = Config::from_lookup(lookup_from(&[("WEATHER_API_KEY", "  ")]));
        assert!(matches!(result, Err(WeatherError::MissingApiKey)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[("WEATHER_API_KEY", "abc")])).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.weather_base_url, DEFAULT_WEATHER_BASE_URL);
        assert_eq!(config.geo_base_url, DEFAULT_GEO_BASE_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("WEATHER_API_KEY", "abc"),
            ("OPENWEATHER_BASE_URL", "http://localhost:9000/"),
            ("WEATHER_CACHE_TTL_SECS", "30"),
            ("WEATHER_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.weather_base_url, "http://localhost:9000");
        assert_eq!(config.geo_base_url, DEFAULT_GEO_BASE_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(30));
        assert_eq!(config.http_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_invalid_ttl() {
        let result = Config::from_lookup(lookup_from(&[
            ("WEATHER_API_KEY", "abc"),
            ("WEATHER_CACHE_TTL_SECS", "ten"),
        ]));
        assert!(matches!(result, Err(WeatherError::InvalidConfig(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
