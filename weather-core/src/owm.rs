//! Decoding of OpenWeatherMap "current weather" payloads into [`WeatherObservation`]s.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::{Result, WeatherError},
    observation::{Measurements, WeatherObservation},
};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    temp_kf: Option<f64>,
    pressure: Option<f64>,
    sea_level: Option<f64>,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwWind {
    speed: Option<f64>,
    deg: Option<f64>,
    gust: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: i64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    #[serde(default)]
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    #[serde(default)]
    rain: Map<String, Value>,
    #[serde(default)]
    snow: Map<String, Value>,
    #[serde(default)]
    sys: OwSys,
}

/// Decode an OpenWeatherMap current-weather document.
pub fn parse_current(json: &str) -> Result<WeatherObservation> {
    let entry: OwEntry = serde_json::from_str(json)?;
    debug!(dt = entry.dt, "decoded OpenWeatherMap current weather");
    entry.into_observation()
}

impl OwEntry {
    fn into_observation(self) -> Result<WeatherObservation> {
        let dt = self.dt;
        let weather = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::MissingData(format!("no 'weather' entry for dt={dt}")))?;

        let wind = readings([
            ("speed", self.wind.speed),
            ("deg", self.wind.deg),
            ("gust", self.wind.gust),
        ]);
        let pressure = readings([
            ("press", self.main.pressure),
            ("sea_level", self.main.sea_level),
        ]);
        let temperature = readings([
            ("temp", Some(self.main.temp)),
            ("temp_min", self.main.temp_min),
            ("temp_max", self.main.temp_max),
            ("feels_like", self.main.feels_like),
            ("temp_kf", self.main.temp_kf),
        ]);

        WeatherObservation::new(
            dt,
            self.sys.sunset.unwrap_or(0),
            self.sys.sunrise.unwrap_or(0),
            self.clouds.all,
            numeric_members(self.rain),
            numeric_members(self.snow),
            wind,
            self.main.humidity,
            pressure,
            temperature,
            weather.main,
            weather.description,
            weather.id,
            weather.icon,
        )
    }
}

fn readings<const N: usize>(pairs: [(&str, Option<f64>); N]) -> Measurements {
    pairs
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
        .collect()
}

fn numeric_members(map: Map<String, Value>) -> Measurements {
    map.into_iter()
        .filter_map(|(k, v)| v.as_f64().map(|v| (k, v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{TimeFormat, TimeValue};
    use serde_json::json;

    fn current_payload() -> Value {
        json!({
            "coord": {"lon": -0.13, "lat": 51.51},
            "weather": [
                {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}
            ],
            "main": {
                "temp": 293.0,
                "feels_like": 292.4,
                "temp_min": 291.2,
                "temp_max": 294.8,
                "pressure": 1030,
                "humidity": 60
            },
            "wind": {"speed": 2.0, "deg": 160},
            "clouds": {"all": 67},
            "rain": {"1h": 0.25},
            "dt": 1378459200,
            "sys": {"country": "GB", "sunrise": 1378425600, "sunset": 1378468800},
            "name": "London"
        })
    }

    #[test]
    fn current_weather_maps_every_field() {
        let obs = parse_current(&current_payload().to_string()).unwrap();

        assert_eq!(obs.reference_time(TimeFormat::Unix).unwrap(), TimeValue::Unix(1378459200));
        assert_eq!(obs.sunrise_time(TimeFormat::Unix).unwrap(), TimeValue::Unix(1378425600));
        assert_eq!(obs.sunset_time(TimeFormat::Unix).unwrap(), TimeValue::Unix(1378468800));
        assert_eq!(obs.clouds(), 67);
        assert_eq!(obs.humidity(), 60);
        assert_eq!(obs.rain().get("1h"), Some(&0.25));
        assert!(obs.snow().is_empty());
        assert_eq!(obs.wind().get("deg"), Some(&160.0));
        assert!(!obs.wind().contains_key("gust"));
        assert_eq!(obs.pressure().get("press"), Some(&1030.0));
        assert_eq!(obs.temperature().get("temp_max"), Some(&294.8));
        assert_eq!(obs.status(), "Clouds");
        assert_eq!(obs.detailed_status(), "broken clouds");
        assert_eq!(obs.weather_code(), 803);
        assert_eq!(obs.weather_icon_name(), "04d");
    }

    #[test]
    fn missing_sys_defaults_times_to_zero() {
        let mut payload = current_payload();
        payload.as_object_mut().unwrap().remove("sys");

        let obs = parse_current(&payload.to_string()).unwrap();
        assert_eq!(obs.sunrise_time(TimeFormat::Unix).unwrap(), TimeValue::Unix(0));
    }

    #[test]
    fn empty_weather_list_is_missing_data() {
        let mut payload = current_payload();
        payload["weather"] = json!([]);

        let err = parse_current(&payload.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::MissingData(_)));
    }

    #[test]
    fn negative_humidity_is_range_error() {
        let mut payload = current_payload();
        payload["main"]["humidity"] = json!(-1);

        let err = parse_current(&payload.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidRange { field: "humidity", .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = parse_current("{not json").unwrap_err();
        assert!(matches!(err, WeatherError::Json(_)));
    }
}
