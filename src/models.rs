use serde::{Deserialize, Serialize};

// Normalized result served to clients and stored in the cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temperature: f64,
    pub conditions: String,
    pub humidity: u32,
    pub wind_speed: f64,
}

// Upstream current-weather response, reduced to the fields we keep
#[derive(Deserialize)]
pub struct UpstreamWeather {
    pub main: UpstreamMain,
    pub weather: Vec<UpstreamCondition>,
    pub wind: UpstreamWind,
}

#[derive(Deserialize)]
pub struct UpstreamMain {
    pub temp: f64,
    pub humidity: u32,
}

#[derive(Deserialize)]
pub struct UpstreamCondition {
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpstreamWind {
    pub speed: f64,
}
