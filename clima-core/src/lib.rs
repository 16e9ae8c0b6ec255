//! Core library for the `clima` weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client (current weather, forecast, city search)
//! - The bounded search-history store
//! - Shared domain models
//!
//! It is used by `clima-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod history;
pub mod model;

pub use client::{DEFAULT_SUGGESTION_LIMIT, FORECAST_DAYS, OpenWeatherClient, WeatherError};
pub use config::Config;
pub use history::{FileHistoryStore, HISTORY_CAP, HistoryStore, MemoryHistoryStore, SearchHistory};
pub use model::{CitySuggestion, CurrentWeather, ForecastDay, Units};
