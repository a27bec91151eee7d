// core/src/metrics.rs
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

/// Prometheus-tellere for kjernen. Kan instansieres per test eller
/// deles via global().
pub struct Metrics {
    registry: Registry,
    weather_cache_hit: IntCounter,
    weather_cache_miss: IntCounter,
}

static GLOBAL: Lazy<Metrics> = Lazy::new(Metrics::new);

/// Prosessvid instans for produksjonsstier.
pub fn global() -> &'static Metrics {
    &GLOBAL
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        let weather_cache_hit = IntCounter::new(
            "biketime_weather_cache_hit_total",
            "Treff i værcachen",
        )
        .unwrap();
        let weather_cache_miss = IntCounter::new(
            "biketime_weather_cache_miss_total",
            "Bom i værcachen",
        )
        .unwrap();
        registry
            .register(Box::new(weather_cache_hit.clone()))
            .unwrap();
        registry
            .register(Box::new(weather_cache_miss.clone()))
            .unwrap();
        Self {
            registry,
            weather_cache_hit,
            weather_cache_miss,
        }
    }

    /// Tekst-eksport av alle registrerte tellere.
    pub fn gather(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        encoder
            .encode(&self.registry.gather(), &mut buf)
            .unwrap_or_default();
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

pub fn weather_cache_hit_total(m: &Metrics) -> &IntCounter {
    &m.weather_cache_hit
}

pub fn weather_cache_miss_total(m: &Metrics) -> &IntCounter {
    &m.weather_cache_miss
}
