use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    history::SearchHistory,
    model::{CitySuggestion, CurrentWeather, ForecastDay, Units},
};

const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Maximum number of calendar days in a reduced forecast.
pub const FORECAST_DAYS: usize = 5;

/// Default cap on autocomplete suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Failures surfaced by [`OpenWeatherClient::current_weather`] and
/// [`OpenWeatherClient::forecast`]. Autocomplete swallows these internally.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Provider answered with a non-success HTTP status.
    #[error("Provider returned HTTP {status}")]
    Http { status: u16 },

    /// Provider payload did not match the expected shape.
    #[error("Failed to decode provider response: {0}")]
    Decode(String),

    /// Request could not be sent or completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Client for the OpenWeatherMap current-weather, forecast and geocoding
/// endpoints.
///
/// One request per call; retries, caching and cancellation are the caller's
/// business. A successful current-weather lookup records the searched city
/// in the injected [`SearchHistory`].
#[derive(Debug)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    weather_base_url: String,
    geocoding_url: String,
    history: SearchHistory,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, history: SearchHistory) -> Self {
        Self {
            http: Client::new(),
            api_key,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            history,
        }
    }

    /// Point the client at different endpoints, e.g. a mock server in tests.
    pub fn with_base_urls(
        mut self,
        weather_base_url: impl Into<String>,
        geocoding_url: impl Into<String>,
    ) -> Self {
        self.weather_base_url = weather_base_url.into();
        self.geocoding_url = geocoding_url.into();
        self
    }

    /// Current conditions for `city`.
    ///
    /// On success the original input `city` string (not the provider's
    /// normalized name) is recorded in the search history.
    pub async fn current_weather(
        &self,
        city: &str,
        units: Units,
        lang: &str,
    ) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/weather", self.weather_base_url);
        debug!(%city, units = %units, "Fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
                ("lang", lang),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;

        self.history.record(city);

        let country = parsed.sys.and_then(|s| s.country).unwrap_or_default();
        let condition = parsed.weather.into_iter().next();

        Ok(CurrentWeather {
            city: format!("{}, {}", parsed.name, country),
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
            description: condition.as_ref().map(|c| c.description.clone()),
            icon: condition.map(|c| c.icon),
            temperature_label: units.temperature_label().to_string(),
            wind_label: units.wind_label().to_string(),
        })
    }

    /// 5-day forecast for `city`, reduced to one entry per calendar date.
    ///
    /// The provider returns 3-hourly samples in chronological order; the
    /// first sample of each date wins and at most [`FORECAST_DAYS`] distinct
    /// dates are returned, in first-encountered order.
    pub async fn forecast(
        &self,
        city: &str,
        units: Units,
        lang: &str,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        let url = format!("{}/forecast", self.weather_base_url);
        debug!(%city, units = %units, "Fetching 5-day forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
                ("lang", lang),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;

        reduce_forecast(parsed.list)
    }

    /// Best-effort city autocomplete.
    ///
    /// A whitespace-only query short-circuits to an empty list without a
    /// request. Any failure is logged and also yields an empty list; this
    /// operation never surfaces an error to the caller.
    pub async fn search_cities(&self, query: &str, limit: usize) -> Vec<CitySuggestion> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        match self.fetch_suggestions(query, limit).await {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(%query, error = %e, "City autocomplete failed");
                Vec::new()
            }
        }
    }

    async fn fetch_suggestions(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<CitySuggestion>, WeatherError> {
        let limit = limit.to_string();

        // The query goes out as given; only the emptiness check trims.
        let res = self
            .http
            .get(&self.geocoding_url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(WeatherError::Http { status: status.as_u16() });
        }

        let body = res.text().await?;
        let parsed: Vec<OwGeoEntry> =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;

        Ok(parsed
            .into_iter()
            .map(|entry| CitySuggestion {
                display_name: format!("{}, {}", entry.name, entry.country),
                latitude: entry.lat,
                longitude: entry.lon,
            })
            .collect())
    }

    /// Previously searched city names, most recent first.
    pub fn search_history(&self) -> Vec<String> {
        self.history.entries()
    }
}

/// Keep the first 3-hourly sample of each calendar date, up to
/// [`FORECAST_DAYS`] distinct dates, in first-encountered order.
fn reduce_forecast(list: Vec<OwForecastEntry>) -> Result<Vec<ForecastDay>, WeatherError> {
    let mut days: Vec<ForecastDay> = Vec::with_capacity(FORECAST_DAYS);

    for entry in list {
        let date_part = entry.dt_txt.split(' ').next().unwrap_or(&entry.dt_txt);
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|e| {
            WeatherError::Decode(format!("Invalid forecast timestamp '{}': {e}", entry.dt_txt))
        })?;

        if days.iter().any(|d| d.date == date) {
            continue;
        }
        if days.len() == FORECAST_DAYS {
            break;
        }

        let condition = entry.weather.into_iter().next();
        days.push(ForecastDay {
            date,
            temperature: entry.main.temp,
            description: condition.as_ref().map(|c| c.description.clone()),
            icon: condition.map(|c| c.icon),
            temperature_min: entry.main.temp_min,
            temperature_max: entry.main.temp_max,
        });
    }

    Ok(days)
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: Option<OwSys>,
    main: OwMain,
    wind: OwWind,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    #[serde(default)]
    weather: Vec<OwCondition>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwGeoEntry {
    name: String,
    country: String,
    lat: f64,
    lon: f64,
}
