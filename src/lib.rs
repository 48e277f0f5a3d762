pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use api::openweather::OpenWeatherApi;
pub use config::Config;
pub use error::{Result, WeatherError};
pub use models::cache::{CacheEntry, QueryCache};
pub use models::clock::{Clock, ManualClock, SystemClock};
pub use models::query::WeatherQuery;
pub use services::weather_service::WeatherService;
