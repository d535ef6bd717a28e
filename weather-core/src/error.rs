use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

/// Failures raised while building or reading a [`WeatherObservation`](crate::WeatherObservation).
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("'{field}' must be {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'{field}' must be greater than or equal to 0, got {value}")]
    InvalidRange { field: &'static str, value: i64 },

    #[error("'{field}' reading '{key}' must be a finite number")]
    NonFiniteReading { field: &'static str, key: String },

    #[error("Invalid value for parameter 'format': '{0}' (expected 'unix' or 'iso')")]
    InvalidArgument(String),

    #[error("UNIX time {0} cannot be represented as a calendar date")]
    Timestamp(i64),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
