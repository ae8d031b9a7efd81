use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cityclock_core::{CityService, Config, ServiceError, TimeReading, WeatherReading};
use inquire::{CustomType, Password, PasswordDisplayMode};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityclock", version, about = "Local time and weather for a few cities")]
pub struct Cli {
    /// Defaults to `serve` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Interface to bind, overrides HOST and the config file.
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on, overrides PORT and the config file.
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Store the OpenWeather API key and port in the config file.
    Configure,

    /// Show current time and weather for one city.
    Show {
        /// City key, e.g. "berlin" (case-insensitive).
        city: String,
    },

    /// List the supported cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve { host: None, port: None }) {
            Command::Serve { host, port } => {
                let mut config = Config::load()?;
                if let Some(host) = host {
                    config.host = host;
                }
                if let Some(port) = port {
                    config.port = port;
                }
                crate::run(&config).await
            }
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::Cities => {
                let service = CityService::from_config(&Config::default())?;
                for city in service.registry().iter() {
                    println!("{:<12} {}, {} ({})", city.key, city.name, city.country, city.timezone);
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Only the file is edited; environment overrides are not persisted.
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key (empty for mock data):")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    config.port = CustomType::<u16>::new("Port:")
        .with_default(config.port)
        .with_error_message("Please enter a port number between 0 and 65535")
        .prompt()
        .context("Failed to read port")?;

    config.save()?;

    println!(
        "Saved configuration to {} (weather source: {})",
        Config::config_file_path()?.display(),
        config.weather_mode(),
    );
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let service = CityService::from_config(&config)?;

    let time = match service.time(city) {
        Ok(time) => time,
        Err(ServiceError::NotFound { .. }) => bail!("City not found: {city}"),
        Err(err) => return Err(err.into()),
    };
    let weather = service.weather(city).await?;

    print!("{}", format_report(&time, &weather, &service.weather_mode().to_string()));
    Ok(())
}

/// Human-readable summary printed by `cityclock show`.
pub fn format_report(time: &TimeReading, weather: &WeatherReading, source: &str) -> String {
    let mut out = format!("{}, {} ({})\n", time.city, time.country, time.timezone);
    out.push_str(&format!("  Local time:  {}\n", time.datetime));
    out.push_str(&format!(
        "  Weather:     {}, {}\u{00b0}C (feels like {}\u{00b0}C)\n",
        weather.description, weather.temperature, weather.feels_like
    ));
    out.push_str(&format!("  Humidity:    {}%\n", weather.humidity));
    out.push_str(&format!("  Wind:        {} m/s\n", weather.wind_speed));
    if let Some(pressure) = weather.pressure {
        out.push_str(&format!("  Pressure:    {pressure} hPa\n"));
    }
    out.push_str(&format!("  Source:      {source}\n"));
    out
}
