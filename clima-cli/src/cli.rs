use std::convert::TryFrom;

use clap::{Parser, Subcommand};
use clima_core::{
    Config, DEFAULT_SUGGESTION_LIMIT, FileHistoryStore, OpenWeatherClient, SearchHistory, Units,
};

use crate::i18n::Lang;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "clima", version, about = "Weather dashboard CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and preferred language.
    Configure,

    /// Show current conditions for a city.
    Current {
        /// City name, e.g. "Madrid".
        city: String,

        /// Unit system: "metric" or "imperial".
        #[arg(long, default_value = "metric")]
        units: String,

        /// Language code for provider descriptions; defaults to the
        /// configured preference.
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show the 5-day forecast for a city, one entry per day.
    Forecast {
        city: String,

        #[arg(long, default_value = "metric")]
        units: String,

        #[arg(long)]
        lang: Option<String>,
    },

    /// Autocomplete city names via the geocoding endpoint.
    Search {
        query: String,

        /// Maximum number of suggestions.
        #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
    },

    /// Show recently searched cities, most recent first.
    History,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let ui = Lang::from_code(config.resolved_language());

        match self.command {
            Command::Configure => configure(config, ui),
            Command::Current { city, units, lang } => {
                let units = Units::try_from(units.as_str())?;
                let lang = lang.unwrap_or_else(|| config.resolved_language().to_string());
                let client = build_client(&config)?;

                let weather = client.current_weather(&city, units, &lang).await?;

                println!("{}", weather.city);
                if let Some(description) = &weather.description {
                    println!("  {description}");
                }
                println!(
                    "  {:.1} {} ({} {:.1} {})",
                    weather.temperature,
                    weather.temperature_label,
                    ui.feels_like(),
                    weather.feels_like,
                    weather.temperature_label,
                );
                println!("  {}: {}%", ui.humidity(), weather.humidity_pct);
                println!("  {}: {:.1} {}", ui.wind(), weather.wind_speed, weather.wind_label);
                Ok(())
            }
            Command::Forecast { city, units, lang } => {
                let units = Units::try_from(units.as_str())?;
                let lang = lang.unwrap_or_else(|| config.resolved_language().to_string());
                let client = build_client(&config)?;

                let days = client.forecast(&city, units, &lang).await?;
                let temp_label = units.temperature_label();

                println!("{} — {city}", ui.forecast_title());
                for day in days {
                    let description = day.description.as_deref().unwrap_or("-");
                    println!(
                        "  {}  {:>5.1} {temp_label} (min {:.1}, max {:.1})  {description}",
                        day.date, day.temperature, day.temperature_min, day.temperature_max,
                    );
                }
                Ok(())
            }
            Command::Search { query, limit } => {
                let client = build_client(&config)?;

                let suggestions = client.search_cities(&query, limit).await;
                if suggestions.is_empty() {
                    println!("{}", ui.no_suggestions());
                } else {
                    for suggestion in suggestions {
                        println!(
                            "{}  ({:.4}, {:.4})",
                            suggestion.display_name, suggestion.latitude, suggestion.longitude,
                        );
                    }
                }
                Ok(())
            }
            Command::History => {
                let history = SearchHistory::new(Box::new(FileHistoryStore::new()?));

                let entries = history.entries();
                if entries.is_empty() {
                    println!("{}", ui.history_empty());
                } else {
                    println!("{}", ui.history_title());
                    for entry in entries {
                        println!("  {entry}");
                    }
                }
                Ok(())
            }
        }
    }
}

fn build_client(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.resolved_api_key()?;
    let history = SearchHistory::new(Box::new(FileHistoryStore::new()?));

    Ok(OpenWeatherClient::new(api_key, history))
}

fn configure(mut config: Config, ui: Lang) -> anyhow::Result<()> {
    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    let language = inquire::Select::new("Preferred language:", vec!["es", "en"]).prompt()?;

    config.api_key = Some(api_key);
    config.language = Some(language.to_string());
    config.save()?;

    println!("{}", ui.configured());
    Ok(())
}
