use thiserror::Error;

// Upstream pipeline failures. Clients only ever see a generic 502; the
// variants feed logs and per-outcome metrics.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("missing WEATHER_API_KEY")]
    MissingApiKey,
    #[error("weather API timeout")]
    Timeout,
    #[error("weather API request failed: {0}")]
    Network(#[source] reqwest::Error),
    #[error("weather API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected weather API response shape: {0}")]
    Shape(String),
}
