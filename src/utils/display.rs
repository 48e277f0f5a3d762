use colored::Colorize;
use prettytable::{format, Cell, Row, Table};
use serde_json::Value;

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_header(&self, text: &str) -> String {
        format!("\n=== {} ===", text.bright_white().bold())
    }

    pub fn format_table(&self, headers: &[&str], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.add_row(Row::new(
            headers.iter().map(|h| Cell::new(h).style_spec("b")).collect(),
        ));

        for row in rows {
            table.add_row(Row::new(row.iter().map(|cell| Cell::new(cell)).collect()));
        }

        table.to_string()
    }

    pub fn format_temperature(&self, temp: Option<f64>, units: &str) -> String {
        match temp {
            Some(t) => format!("{:.1}{}", t, temperature_suffix(units)),
            None => "-".to_string(),
        }
    }

    pub fn format_colored_temperature(&self, temp: Option<f64>, units: &str) -> String {
        let text = self.format_temperature(temp, units);
        match temp.map(|t| to_celsius(t, units)) {
            Some(c) if c >= 25.0 => text.red().to_string(),
            Some(c) if c <= 5.0 => text.blue().to_string(),
            _ => text,
        }
    }

    /// Renders whatever the weather endpoint returned. Fields that are missing
    /// or of the wrong type show as `-`.
    pub fn format_weather_summary(&self, weather: &Value, units: &str) -> String {
        let name = weather
            .get("name")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown location");
        let description = weather
            .get("weather")
            .and_then(|w| w.get(0))
            .and_then(|w| w.get("description"))
            .and_then(|d| d.as_str())
            .unwrap_or("-");
        let main = weather.get("main");
        let temp = main.and_then(|m| m.get("temp")).and_then(|t| t.as_f64());
        let feels_like = main.and_then(|m| m.get("feels_like")).and_then(|t| t.as_f64());
        let humidity = main
            .and_then(|m| m.get("humidity"))
            .and_then(|h| h.as_f64())
            .map(|h| format!("{:.0}%", h))
            .unwrap_or_else(|| "-".to_string());
        let wind = weather
            .get("wind")
            .and_then(|w| w.get("speed"))
            .and_then(|s| s.as_f64())
            .map(|s| format!("{:.1} {}", s, speed_suffix(units)))
            .unwrap_or_else(|| "-".to_string());

        let mut output = Vec::new();
        output.push(self.format_header(name));
        output.push(format!("Conditions: {}", description));
        output.push(format!(
            "Temperature: {}",
            self.format_colored_temperature(temp, units)
        ));
        output.push(format!(
            "Feels like: {}",
            self.format_temperature(feels_like, units)
        ));
        output.push(format!("Humidity: {}", humidity));
        output.push(format!("Wind: {}", wind));

        output.join("\n")
    }

    pub fn format_geo_coords(&self, coords: &Value) -> String {
        let text = |field: &str| {
            coords
                .get(field)
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    Value::Null => "-".to_string(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| "-".to_string())
        };

        let headers = &["Zip", "Name", "Latitude", "Longitude", "Country"];
        let rows = vec![vec![
            text("zip"),
            text("name"),
            text("lat"),
            text("lon"),
            text("country"),
        ]];
        self.format_table(headers, &rows)
    }
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn temperature_suffix(units: &str) -> &'static str {
    match units {
        "metric" => "°C",
        "imperial" => "°F",
        _ => " K",
    }
}

fn speed_suffix(units: &str) -> &'static str {
    match units {
        "imperial" => "mph",
        _ => "m/s",
    }
}

fn to_celsius(temp: f64, units: &str) -> f64 {
    match units {
        "metric" => temp,
        "imperial" => (temp - 32.0) * 5.0 / 9.0,
        _ => temp - 273.15,
    }
}
