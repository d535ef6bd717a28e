use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    error::{Result, WeatherError},
    record::ObservationRecord,
    time::{self, TimeFormat, TimeValue},
};

/// Free-form numeric readings keyed by name, e.g. `{"speed": 2.0, "deg": 160.0}`.
pub type Measurements = BTreeMap<String, f64>;

/// An immutable snapshot of weather readings at a given GMT UNIX time.
///
/// Every instance has passed validation: the time fields, `clouds` and
/// `humidity` are never negative. Fields are only reachable through the
/// accessors, so nothing changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservationRecord")]
pub struct WeatherObservation {
    reference_time: i64,
    sunset_time: i64,
    sunrise_time: i64,
    clouds: i64,
    rain: Measurements,
    snow: Measurements,
    wind: Measurements,
    humidity: i64,
    pressure: Measurements,
    temperature: Measurements,
    status: String,
    detailed_status: String,
    weather_code: i64,
    weather_icon_name: String,
}

impl WeatherObservation {
    /// Build an observation, failing on the first negative time or percentage
    /// field ([`WeatherError::InvalidRange`]) or NaN/infinite reading
    /// ([`WeatherError::NonFiniteReading`]).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reference_time: i64,
        sunset_time: i64,
        sunrise_time: i64,
        clouds: i64,
        rain: Measurements,
        snow: Measurements,
        wind: Measurements,
        humidity: i64,
        pressure: Measurements,
        temperature: Measurements,
        status: impl Into<String>,
        detailed_status: impl Into<String>,
        weather_code: i64,
        weather_icon_name: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            reference_time: non_negative("reference_time", reference_time)?,
            sunset_time: non_negative("sunset_time", sunset_time)?,
            sunrise_time: non_negative("sunrise_time", sunrise_time)?,
            clouds: non_negative("clouds", clouds)?,
            rain: finite("rain", rain)?,
            snow: finite("snow", snow)?,
            wind: finite("wind", wind)?,
            humidity: non_negative("humidity", humidity)?,
            pressure: finite("pressure", pressure)?,
            temperature: finite("temperature", temperature)?,
            status: status.into(),
            detailed_status: detailed_status.into(),
            weather_code,
            weather_icon_name: weather_icon_name.into(),
        })
    }

    /// Decode a flat JSON object carrying the fourteen fields by name.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: ObservationRecord = serde_json::from_str(json)?;
        Self::try_from(record)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// GMT UNIX time of the measurement.
    pub fn reference_time(&self, format: TimeFormat) -> Result<TimeValue> {
        time::render(self.reference_time, format)
    }

    /// GMT UNIX time of sunset.
    pub fn sunset_time(&self, format: TimeFormat) -> Result<TimeValue> {
        time::render(self.sunset_time, format)
    }

    /// GMT UNIX time of sunrise.
    pub fn sunrise_time(&self, format: TimeFormat) -> Result<TimeValue> {
        time::render(self.sunrise_time, format)
    }

    /// Like [`reference_time`](Self::reference_time) with a textual selector
    /// (`"unix"` or `"iso"`).
    pub fn reference_time_as(&self, format: &str) -> Result<TimeValue> {
        self.reference_time(format.parse()?)
    }

    pub fn sunset_time_as(&self, format: &str) -> Result<TimeValue> {
        self.sunset_time(format.parse()?)
    }

    pub fn sunrise_time_as(&self, format: &str) -> Result<TimeValue> {
        self.sunrise_time(format.parse()?)
    }

    /// Cloud coverage percentage.
    pub fn clouds(&self) -> i64 {
        self.clouds
    }

    pub fn rain(&self) -> &Measurements {
        &self.rain
    }

    pub fn snow(&self) -> &Measurements {
        &self.snow
    }

    pub fn wind(&self) -> &Measurements {
        &self.wind
    }

    /// Atmospheric humidity percentage.
    pub fn humidity(&self) -> i64 {
        self.humidity
    }

    pub fn pressure(&self) -> &Measurements {
        &self.pressure
    }

    pub fn temperature(&self) -> &Measurements {
        &self.temperature
    }

    /// Short status, e.g. `Clouds`.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Detailed status, e.g. `broken clouds`.
    pub fn detailed_status(&self) -> &str {
        &self.detailed_status
    }

    /// Provider weather condition code, e.g. `803`.
    pub fn weather_code(&self) -> i64 {
        self.weather_code
    }

    pub fn weather_icon_name(&self) -> &str {
        &self.weather_icon_name
    }
}

impl From<&WeatherObservation> for ObservationRecord {
    fn from(obs: &WeatherObservation) -> Self {
        Self {
            reference_time: obs.reference_time.into(),
            sunset_time: obs.sunset_time.into(),
            sunrise_time: obs.sunrise_time.into(),
            clouds: obs.clouds.into(),
            rain: json!(obs.rain),
            snow: json!(obs.snow),
            wind: json!(obs.wind),
            humidity: obs.humidity.into(),
            pressure: json!(obs.pressure),
            temperature: json!(obs.temperature),
            status: obs.status.clone().into(),
            detailed_status: obs.detailed_status.clone().into(),
            weather_code: obs.weather_code.into(),
            weather_icon_name: obs.weather_icon_name.clone().into(),
        }
    }
}

pub(crate) fn non_negative(field: &'static str, value: i64) -> Result<i64> {
    if value < 0 {
        return Err(WeatherError::InvalidRange { field, value });
    }
    Ok(value)
}

// JSON has no NaN or infinity, so such readings could not be written back out.
fn finite(field: &'static str, readings: Measurements) -> Result<Measurements> {
    if let Some(key) = readings.iter().find(|(_, v)| !v.is_finite()).map(|(k, _)| k) {
        return Err(WeatherError::NonFiniteReading {
            field,
            key: key.clone(),
        });
    }
    Ok(readings)
}
