use crate::config::Config;
use crate::error::{Result, WeatherError};
use crate::models::cache::QueryCache;
use crate::models::query::WeatherQuery;
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

pub struct OpenWeatherApi {
    client: Client,
    config: Config,
    cache: Arc<QueryCache>,
}

impl OpenWeatherApi {
    pub fn new(config: Config, cache: Arc<QueryCache>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Current weather for a coordinate pair. Served from the cache while the
    /// stored entry is fresh.
    pub async fn fetch_weather_data(&self, query: &WeatherQuery) -> Result<Value> {
        let key = query.cache_key();

        if let Some(data) = self.cache.get_fresh(&key) {
            debug!("Cache hit for {}", key);
            return Ok(data);
        }

        debug!("Cache miss for {}", key);
        let url = format!("{}/data/2.5/weather", self.config.weather_base_url);
        let lat = query.lat.to_string();
        let lon = query.lon.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", query.units.as_str()),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let json = read_json(response, "weather data").await?;
        self.cache.put(key, json.clone());

        Ok(json)
    }

    /// Coordinates for a postal code. Never cached.
    pub async fn get_geo_coords_for_postal_code(
        &self,
        postal_code: &str,
        country_code: &str,
    ) -> Result<Value> {
        let url = format!("{}/geo/1.0/zip", self.config.geo_base_url);
        let zip = format!("{},{}", postal_code, country_code);

        debug!("Sending geocode request for zip {}", zip);
        let response = self
            .client
            .get(&url)
            .query(&[("zip", zip.as_str()), ("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        read_json(response, "geolocation data").await
    }
}

async fn read_json(response: Response, what: &str) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;
    let json: Value = serde_json::from_str(&body)?;

    if !status.is_success() {
        error!("Error fetching {}: {} {}", what, status, json);
        let upstream = match json.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => json.to_string(),
        };
        return Err(WeatherError::UpstreamRequestFailed {
            status,
            message: format!("Failed to fetch {}: {}", what, upstream),
        });
    }

    Ok(json)
}
