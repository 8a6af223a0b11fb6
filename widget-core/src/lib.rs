//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its weatherapi.com client
//! - The search state controller the presentation layer binds to
//! - Formatting of results into display strings
//!
//! It is used by `weather-widget`, but can also back other front ends.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod search;

pub use config::Config;
pub use error::{FetchError, ValidationError};
pub use format::WeatherView;
pub use model::{TemperatureUnit, WeatherResult};
pub use provider::{WeatherProvider, provider_from_config};
pub use search::{SearchController, SearchState, SubmitOutcome};
