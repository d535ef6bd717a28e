//! Untyped construction boundary for [`WeatherObservation`].
//!
//! Upstream decoders hand over loosely typed JSON values; this module checks
//! each one against the type the observation needs before building it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{Result, WeatherError},
    observation::{Measurements, WeatherObservation, non_negative},
};

/// The fourteen observation fields as raw JSON values. Absent fields are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationRecord {
    pub reference_time: Value,
    pub sunset_time: Value,
    pub sunrise_time: Value,
    pub clouds: Value,
    pub rain: Value,
    pub snow: Value,
    pub wind: Value,
    pub humidity: Value,
    pub pressure: Value,
    pub temperature: Value,
    pub status: Value,
    pub detailed_status: Value,
    pub weather_code: Value,
    pub weather_icon_name: Value,
}

impl TryFrom<ObservationRecord> for WeatherObservation {
    type Error = WeatherError;

    fn try_from(record: ObservationRecord) -> Result<Self> {
        // Fields are extracted in declaration order; the first bad one wins.
        let reference_time = count("reference_time", &record.reference_time)?;
        let sunset_time = count("sunset_time", &record.sunset_time)?;
        let sunrise_time = count("sunrise_time", &record.sunrise_time)?;
        let clouds = count("clouds", &record.clouds)?;
        let rain = mapping("rain", &record.rain)?;
        let snow = mapping("snow", &record.snow)?;
        let wind = mapping("wind", &record.wind)?;
        let humidity = count("humidity", &record.humidity)?;
        let pressure = mapping("pressure", &record.pressure)?;
        let temperature = mapping("temperature", &record.temperature)?;
        let status = text("status", record.status)?;
        let detailed_status = text("detailed_status", record.detailed_status)?;
        let weather_code = integer("weather_code", &record.weather_code)?;
        let weather_icon_name = text("weather_icon_name", record.weather_icon_name)?;

        WeatherObservation::new(
            reference_time,
            sunset_time,
            sunrise_time,
            clouds,
            rain,
            snow,
            wind,
            humidity,
            pressure,
            temperature,
            status,
            detailed_status,
            weather_code,
            weather_icon_name,
        )
    }
}

fn integer(field: &'static str, value: &Value) -> Result<i64> {
    value.as_i64().ok_or(WeatherError::TypeMismatch {
        field,
        expected: "an integer",
    })
}

/// An integer that must also be non-negative; the type is checked first.
fn count(field: &'static str, value: &Value) -> Result<i64> {
    non_negative(field, integer(field, value)?)
}

fn mapping(field: &'static str, value: &Value) -> Result<Measurements> {
    let mismatch = WeatherError::TypeMismatch {
        field,
        expected: "a mapping of names to numbers",
    };

    let Some(object) = value.as_object() else {
        return Err(mismatch);
    };

    let mut out = Measurements::new();
    for (key, reading) in object {
        let Some(n) = reading.as_f64() else {
            return Err(mismatch);
        };
        out.insert(key.clone(), n);
    }
    Ok(out)
}

fn text(field: &'static str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(WeatherError::TypeMismatch {
            field,
            expected: "a string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> ObservationRecord {
        serde_json::from_value(json!({
            "reference_time": 1378459200,
            "sunset_time": 1378468800,
            "sunrise_time": 1378425600,
            "clouds": 67,
            "rain": {},
            "snow": {},
            "wind": {"speed": 2.0},
            "humidity": 60,
            "pressure": {"press": 1030.0},
            "temperature": {"temp": 293.0},
            "status": "Clouds",
            "detailed_status": "broken clouds",
            "weather_code": 803,
            "weather_icon_name": "04d"
        }))
        .unwrap()
    }

    fn mismatched_field(err: WeatherError) -> &'static str {
        match err {
            WeatherError::TypeMismatch { field, .. } => field,
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn valid_record_builds_observation() {
        let obs = WeatherObservation::try_from(valid_record()).unwrap();
        assert_eq!(obs.clouds(), 67);
        assert_eq!(obs.weather_code(), 803);
        assert_eq!(obs.wind().get("speed"), Some(&2.0));
    }

    #[test]
    fn float_time_is_type_mismatch() {
        let mut record = valid_record();
        record.reference_time = json!(1378459200.5);

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "reference_time");
    }

    #[test]
    fn string_percentage_is_type_mismatch() {
        let mut record = valid_record();
        record.humidity = json!("60");

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "humidity");
    }

    #[test]
    fn non_object_mapping_is_type_mismatch() {
        let mut record = valid_record();
        record.wind = json!([2.0]);

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "wind");
    }

    #[test]
    fn non_numeric_reading_is_type_mismatch() {
        let mut record = valid_record();
        record.pressure = json!({"press": "high"});

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "pressure");
    }

    #[test]
    fn text_and_code_fields_are_type_checked() {
        let cases: [(fn(&mut ObservationRecord), &str); 4] = [
            (|r| r.status = json!(1), "status"),
            (|r| r.detailed_status = json!(null), "detailed_status"),
            (|r| r.weather_code = json!("803"), "weather_code"),
            (|r| r.weather_icon_name = json!(["04d"]), "weather_icon_name"),
        ];

        for (mutate, field) in cases {
            let mut record = valid_record();
            mutate(&mut record);
            let err = WeatherObservation::try_from(record).unwrap_err();
            assert_eq!(mismatched_field(err), field);
        }
    }

    #[test]
    fn missing_field_is_type_mismatch() {
        let record: ObservationRecord = serde_json::from_value(json!({
            "reference_time": 1,
            "sunset_time": 2,
            "sunrise_time": 3
        }))
        .unwrap();

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "clouds");
    }

    #[test]
    fn type_mismatch_precedes_later_range_error() {
        let mut record = valid_record();
        record.clouds = json!(true);
        record.humidity = json!(-1);

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert_eq!(mismatched_field(err), "clouds");
    }

    #[test]
    fn range_error_precedes_later_type_mismatch() {
        let mut record = valid_record();
        record.reference_time = json!(-1);
        record.clouds = json!(true);

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidRange { field: "reference_time", value: -1 }));
    }

    #[test]
    fn negative_integer_is_range_error() {
        let mut record = valid_record();
        record.clouds = json!(-5);

        let err = WeatherObservation::try_from(record).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidRange { field: "clouds", value: -5 }));
    }

    #[test]
    fn record_from_observation_roundtrips() {
        let obs = WeatherObservation::try_from(valid_record()).unwrap();
        let record = ObservationRecord::from(&obs);
        assert_eq!(WeatherObservation::try_from(record).unwrap(), obs);
    }
}
