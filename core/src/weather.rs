// core/src/weather.rs
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;

use crate::metrics::{weather_cache_hit_total, weather_cache_miss_total, Metrics};
use crate::models::Weather;

/// Værsammendrag for en økt, fra API, cache eller statisk kilde.
#[derive(Debug, Clone, Copy)]
pub struct WeatherSummary {
    pub wind_speed_ms: f64,
    pub wind_dir_deg: f64,
    pub temperature_c: f64,
    pub pressure_hpa: f64,
    pub humidity_pct: Option<f64>,
}

impl WeatherSummary {
    /// Til modellens værparametre. Duggpunkt leveres ikke av tilbyderne,
    /// så tettheten regnes fra relativ fuktighet når den finnes.
    pub fn to_weather(self) -> Weather {
        Weather {
            wind_ms: self.wind_speed_ms,
            wind_dir_deg: self.wind_dir_deg,
            air_temp_c: self.temperature_c,
            air_pressure_hpa: self.pressure_hpa,
            dewpoint_c: None,
            humidity_pct: self.humidity_pct,
        }
    }
}

pub trait WeatherProvider {
    fn get_weather_for_session(
        &self,
        start_time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        duration_secs: u32,
    ) -> Option<WeatherSummary>;
}

/// Statisk tilbyder for tester og offline-kjøring.
pub struct StaticWeatherProvider {
    pub summary: Option<WeatherSummary>,
}

impl WeatherProvider for StaticWeatherProvider {
    fn get_weather_for_session(
        &self,
        _start_time: DateTime<Utc>,
        _lat: f64,
        _lon: f64,
        _duration_secs: u32,
    ) -> Option<WeatherSummary> {
        self.summary
    }
}

type CacheKey = (OrderedFloat<f64>, OrderedFloat<f64>, i64);

/// Cachende klient rundt en indre tilbyder, nøklet på (lat, lon, start).
pub struct WeatherClient<P> {
    inner: P,
    cache: Mutex<HashMap<CacheKey, WeatherSummary>>,
}

impl<P: WeatherProvider> WeatherClient<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_weather(
        &self,
        start_time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        duration_secs: u32,
        metrics: &Metrics,
    ) -> Option<WeatherSummary> {
        let key = (OrderedFloat(lat), OrderedFloat(lon), start_time.timestamp());

        if let Some(hit) = self.cache.lock().unwrap().get(&key) {
            weather_cache_hit_total(metrics).inc();
            return Some(*hit);
        }

        let fetched = self
            .inner
            .get_weather_for_session(start_time, lat, lon, duration_secs)?;
        self.cache.lock().unwrap().insert(key, fetched);
        weather_cache_miss_total(metrics).inc();
        Some(fetched)
    }
}

impl<P: WeatherProvider> WeatherProvider for WeatherClient<P> {
    fn get_weather_for_session(
        &self,
        start_time: DateTime<Utc>,
        lat: f64,
        lon: f64,
        duration_secs: u32,
    ) -> Option<WeatherSummary> {
        self.get_weather(
            start_time,
            lat,
            lon,
            duration_secs,
            crate::metrics::global(),
        )
    }
}
