use crate::api::openweather::OpenWeatherApi;
use crate::config::Config;
use crate::error::{Result, WeatherError};
use crate::models::cache::QueryCache;
use crate::models::clock::SystemClock;
use crate::models::query::WeatherQuery;
use crate::utils::display::DisplayFormatter;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

pub struct WeatherService {
    api: OpenWeatherApi,
    display: DisplayFormatter,
}

impl WeatherService {
    pub fn new(config: Config) -> Result<Self> {
        let cache = Arc::new(QueryCache::with_clock(
            Arc::new(SystemClock),
            config.cache_ttl,
        ));
        Self::with_cache(config, cache)
    }

    pub fn with_cache(config: Config, cache: Arc<QueryCache>) -> Result<Self> {
        Ok(Self {
            api: OpenWeatherApi::new(config, cache)?,
            display: DisplayFormatter::new(),
        })
    }

    pub fn api(&self) -> &OpenWeatherApi {
        &self.api
    }

    pub async fn current_weather(&self, lat: f64, lon: f64, units: &str) -> Result<Value> {
        self.api
            .fetch_weather_data(&WeatherQuery::new(lat, lon, units))
            .await
    }

    pub async fn coords_for_postal_code(&self, postal_code: &str, country_code: &str) -> Result<Value> {
        self.api
            .get_geo_coords_for_postal_code(postal_code, country_code)
            .await
    }

    /// Geocodes the postal code, then looks up current weather at the result.
    pub async fn weather_for_postal_code(
        &self,
        postal_code: &str,
        country_code: &str,
        units: &str,
    ) -> Result<(Value, Value)> {
        let coords = self.coords_for_postal_code(postal_code, country_code).await?;
        let (lat, lon) = match (
            coords.get("lat").and_then(|v| v.as_f64()),
            coords.get("lon").and_then(|v| v.as_f64()),
        ) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(WeatherError::UnexpectedPayload(format!(
                    "no lat/lon in geocode response for {},{}",
                    postal_code, country_code
                )))
            }
        };

        info!("Resolved {},{} to ({}, {})", postal_code, country_code, lat, lon);
        let weather = self.current_weather(lat, lon, units).await?;
        Ok((coords, weather))
    }

    pub async fn fetch_and_display_weather(&self, lat: f64, lon: f64, units: &str) -> Result<()> {
        info!("Fetching weather for ({}, {})", lat, lon);
        match self.current_weather(lat, lon, units).await {
            Ok(weather) => {
                println!("{}", self.display.format_weather_summary(&weather, units));
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch weather for ({}, {}): {}", lat, lon, e);
                Err(e)
            }
        }
    }

    pub async fn fetch_and_display_coords(&self, postal_code: &str, country_code: &str) -> Result<()> {
        info!("Geocoding {},{}", postal_code, country_code);
        match self.coords_for_postal_code(postal_code, country_code).await {
            Ok(coords) => {
                println!("{}", self.display.format_header("Location"));
                println!("{}", self.display.format_geo_coords(&coords));
                Ok(())
            }
            Err(e) => {
                error!("Failed to geocode {},{}: {}", postal_code, country_code, e);
                Err(e)
            }
        }
    }

    pub async fn fetch_and_display_postal_weather(
        &self,
        postal_code: &str,
        country_code: &str,
        units: &str,
    ) -> Result<()> {
        match self
            .weather_for_postal_code(postal_code, country_code, units)
            .await
        {
            Ok((coords, weather)) => {
                println!("{}", self.display.format_geo_coords(&coords));
                println!("{}", self.display.format_weather_summary(&weather, units));
                Ok(())
            }
            Err(e) => {
                error!(
                    "Failed to fetch weather for {},{}: {}",
                    postal_code, country_code, e
                );
                Err(e)
            }
        }
    }
}
