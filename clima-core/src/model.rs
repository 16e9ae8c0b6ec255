use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Unit system for a single lookup.
///
/// Display labels are derived from the requested system, never from the
/// provider payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_label(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: metric, imperial."
            )),
        }
    }
}

/// Current conditions for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// "Name, CountryCode"; the country part is empty when the provider
    /// omits it.
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    /// None when the provider's condition array is empty.
    pub description: Option<String>,
    pub icon: Option<String>,
    pub temperature_label: String,
    pub wind_label: String,
}

/// One calendar day of the reduced forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub temperature: f64,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub temperature_min: f64,
    pub temperature_max: f64,
}

/// Autocomplete candidate from the geocoding endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitySuggestion {
    /// "Name, CountryCode".
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}
