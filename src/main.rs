use openweather_sj::{Config, WeatherService};
use std::error::Error;
use std::io::{self, Write};
use tracing::{debug, info, warn};

const DEFAULT_UNITS: &str = "metric";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting OpenWeather client");

    let config = Config::from_env()?;
    debug!("Loaded configuration: {:?}", config);
    let weather_service = WeatherService::new(config)?;

    println!("=== OpenWeather ===");
    println!("Commands:");
    println!("  weather <lat> <lon> [units]          - Current weather at coordinates");
    println!("  zip <postal code> <country>          - Coordinates for a postal code");
    println!("  zipweather <postal> <country> [units] - Current weather for a postal code");
    println!("  exit                                 - Exit the program");

    let mut input = String::new();
    loop {
        input.clear();
        print!("> ");
        io::stdout().flush()?;
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let args: Vec<&str> = input.split_whitespace().collect();
        let result = match args.as_slice() {
            [] => continue,
            ["exit"] => {
                debug!("Received exit command");
                break;
            }
            ["weather", lat, lon, rest @ ..] => {
                let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
                    println!("Latitude and longitude must be numbers");
                    continue;
                };
                let units = rest.first().copied().unwrap_or(DEFAULT_UNITS);
                weather_service.fetch_and_display_weather(lat, lon, units).await
            }
            ["zip", postal_code, country_code] => {
                weather_service
                    .fetch_and_display_coords(postal_code, country_code)
                    .await
            }
            ["zipweather", postal_code, country_code, rest @ ..] => {
                let units = rest.first().copied().unwrap_or(DEFAULT_UNITS);
                weather_service
                    .fetch_and_display_postal_weather(postal_code, country_code, units)
                    .await
            }
            _ => {
                println!("Unknown command: {}", input.trim());
                continue;
            }
        };

        if let Err(e) = result {
            warn!("Command failed: {}", e);
            println!("Error: {}", e);
        }
    }

    info!("Shutting down");
    Ok(())
}
