use serde::{Deserialize, Serialize};

/// Parameters of a current-weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    pub units: String,
}

impl WeatherQuery {
    pub fn new(lat: f64, lon: f64, units: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            units: units.into(),
        }
    }

    /// Cache key built from the semantic parameters only. The API key never
    /// ends up in here.
    pub fn cache_key(&self) -> String {
        // `+ 0.0` folds -0.0 into 0.0
        format!(
            "lat={}&lon={}&units={}",
            self.lat + 0.0,
            self.lon + 0.0,
            self.units
        )
    }
}
