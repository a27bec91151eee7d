// core/src/weather_api.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ureq::Agent;

use crate::weather::{WeatherProvider, WeatherSummary};

#[derive(Debug, Clone, Deserialize)]
struct OpenMeteoResp {
    #[serde(alias = "current", alias = "current_weather")]
    current: CurrentWeather,
}

#[derive(Debug, Clone, Deserialize)]
struct CurrentWeather {
    #[serde(alias = "temperature", alias = "temperature_2m")]
    temperature_2m: f64,
    #[serde(alias = "windspeed", alias = "wind_speed_10m")]
    wind_speed_10m: f64,
    #[serde(alias = "winddirection", alias = "wind_direction_10m")]
    wind_direction_10m: f64,
    #[serde(alias = "pressure", alias = "surface_pressure")]
    surface_pressure: f64,
    #[serde(default)]
    relative_humidity_2m: Option<f64>,
}

/// Open-Meteo-klient, enkel blocking-versjon (ureq).
pub struct OpenMeteoClient {
    agent: Agent,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        // ureq bruker rustls når "tls" er aktivert
        let agent = ureq::AgentBuilder::new()
            .timeout(std::time::Duration::from_secs(10))
            .build();
        Self { agent }
    }

    fn fetch(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={lat}&longitude={lon}&current=temperature_2m,relative_humidity_2m,wind_speed_10m,wind_direction_10m,surface_pressure"
        );
        let resp = self.agent.get(&url).call().context("open-meteo-kall feilet")?;
        let body: OpenMeteoResp = resp
            .into_json()
            .context("kunne ikke parse open-meteo-svar")?;
        Ok(body.current)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherProvider for OpenMeteoClient {
    fn get_weather_for_session(
        &self,
        _start_time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        _duration_secs: u32,
    ) -> Option<WeatherSummary> {
        match self.fetch(lat, lon) {
            Ok(cur) => {
                log::debug!(
                    "[OpenMeteo] lat={:.3}, lon={:.3} => {:.1}°C, {:.1} m/s @ {:.0}°, {:.0} hPa",
                    lat,
                    lon,
                    cur.temperature_2m,
                    cur.wind_speed_10m,
                    cur.wind_direction_10m,
                    cur.surface_pressure
                );
                Some(WeatherSummary {
                    wind_speed_ms: cur.wind_speed_10m,
                    wind_dir_deg: cur.wind_direction_10m,
                    temperature_c: cur.temperature_2m,
                    pressure_hpa: cur.surface_pressure,
                    humidity_pct: cur.relative_humidity_2m,
                })
            }
            Err(err) => {
                log::warn!("open-meteo-oppslag feilet: {err:#}");
                None
            }
        }
    }
}
