//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The validated, immutable [`WeatherObservation`] record
//! - GMT UNIX time rendering for the observation's time fields
//! - Decoders for untyped records and OpenWeatherMap payloads
//! - Configuration handling for the CLI
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod observation;
pub mod owm;
pub mod record;
pub mod time;

pub use config::Config;
pub use error::{Result, WeatherError};
pub use observation::{Measurements, WeatherObservation};
pub use record::ObservationRecord;
pub use time::{TimeFormat, TimeValue};
