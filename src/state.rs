use std::time::Duration;

use crate::config::Args;
use crate::rate_limit::RateLimiter;
use crate::upstream::WeatherClient;

// App's shared state. The limiter owns the counter store and the weather
// client owns the response cache; nothing else touches either.
pub struct AppState {
    pub limiter: RateLimiter,
    pub weather: WeatherClient,
}

impl AppState {
    pub fn new(args: &Args) -> Self {
        Self {
            limiter: RateLimiter::new(args.rate_limit, Duration::from_secs(args.rate_window)),
            weather: WeatherClient::new(
                reqwest::Client::new(),
                args.weather_url.clone(),
                args.api_key.clone(),
                Duration::from_secs(args.upstream_timeout),
            ),
        }
    }
}
