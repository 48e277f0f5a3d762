use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("{message}")]
    UpstreamRequestFailed { status: StatusCode, message: String },

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing WEATHER_API_KEY environment variable")]
    MissingApiKey,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected payload: {0}")]
    UnexpectedPayload(String),
}

// Request URLs carry `appid`, so they never make it into error text.
impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Http(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
