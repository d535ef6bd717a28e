use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use weather_core::{Config, Measurements, TimeFormat, WeatherObservation, owm};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather observation CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default time format ("unix" or "iso").
    Configure {
        /// Time format; prompts interactively when omitted.
        format: Option<String>,
    },

    /// Show the observation stored in a JSON file.
    Show {
        /// Path to an OpenWeatherMap current-weather response.
        file: PathBuf,

        /// Time format override: "unix" or "iso".
        #[arg(long)]
        format: Option<String>,

        /// Treat FILE as a flat observation record instead of an OpenWeatherMap payload.
        #[arg(long)]
        record: bool,

        /// Print the observation as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { format } => configure(format),
            Command::Show {
                file,
                format,
                record,
                json,
            } => show(&file, format.as_deref(), record, json),
        }
    }
}

fn configure(format: Option<String>) -> Result<()> {
    let format = match format {
        Some(s) => TimeFormat::try_from(s.as_str())?,
        None => inquire::Select::new("Default time format:", TimeFormat::all().to_vec())
            .prompt()
            .context("Failed to read time format selection")?,
    };

    let mut cfg = Config::load()?;
    cfg.set_time_format(format);
    cfg.save()?;

    info!(%format, "saved default time format");
    println!("Default time format set to '{format}'.");
    Ok(())
}

fn show(file: &Path, format: Option<&str>, record: bool, json: bool) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read observation file: {}", file.display()))?;

    let observation = if record {
        WeatherObservation::from_json(&contents)
    } else {
        owm::parse_current(&contents)
    }
    .with_context(|| format!("Failed to build observation from {}", file.display()))?;

    if json {
        println!("{}", observation.to_json()?);
        return Ok(());
    }

    let format = match format {
        Some(s) => TimeFormat::try_from(s)?,
        None => Config::load()?.default_time_format()?,
    };
    debug!(%format, "rendering observation");

    print!("{}", render(&observation, format)?);
    Ok(())
}

fn render(obs: &WeatherObservation, format: TimeFormat) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}), code {} [{}]\n",
        obs.status(),
        obs.detailed_status(),
        obs.weather_code(),
        obs.weather_icon_name()
    ));
    out.push_str(&format!("  measured:    {}\n", obs.reference_time(format)?));
    out.push_str(&format!("  sunrise:     {}\n", obs.sunrise_time(format)?));
    out.push_str(&format!("  sunset:      {}\n", obs.sunset_time(format)?));
    out.push_str(&format!("  clouds:      {}%\n", obs.clouds()));
    out.push_str(&format!("  humidity:    {}%\n", obs.humidity()));
    out.push_str(&format!("  temperature: {}\n", readings(obs.temperature())));
    out.push_str(&format!("  pressure:    {}\n", readings(obs.pressure())));
    out.push_str(&format!("  wind:        {}\n", readings(obs.wind())));
    out.push_str(&format!("  rain:        {}\n", readings(obs.rain())));
    out.push_str(&format!("  snow:        {}\n", readings(obs.snow())));
    Ok(out)
}

fn readings(map: &Measurements) -> String {
    if map.is_empty() {
        return "-".to_string();
    }
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
