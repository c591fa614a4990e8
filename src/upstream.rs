use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tracing::debug;

use crate::cache::WeatherCache;
use crate::error::WeatherError;
use crate::metrics::{UPSTREAM_LATENCY, UPSTREAM_REQUESTS};
use crate::models::{UpstreamWeather, WeatherReport};

// 1 initial try + 1 retry
const MAX_ATTEMPTS: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

// Cache-then-fetch client for the upstream weather API
pub struct WeatherClient {
    http: reqwest::Client,
    cache: WeatherCache,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

// Per-attempt result, classified for retry and metric labeling
enum AttemptOutcome {
    Response(reqwest::Response),
    Timeout,
    Network(reqwest::Error),
}

impl AttemptOutcome {
    fn classify(result: Result<reqwest::Response, reqwest::Error>) -> Self {
        match result {
            Ok(response) => Self::Response(response),
            Err(err) if err.is_timeout() => Self::Timeout,
            Err(err) => Self::Network(err),
        }
    }

    fn metric_label(&self) -> String {
        match self {
            Self::Response(response) => response.status().as_u16().to_string(),
            Self::Timeout => "timeout".to_string(),
            Self::Network(_) => "request_exception".to_string(),
        }
    }

    // Server errors, timeouts and transport failures are worth a retry;
    // 4xx responses are final.
    fn retryable(&self) -> bool {
        match self {
            Self::Response(response) => response.status().is_server_error(),
            Self::Timeout | Self::Network(_) => true,
        }
    }
}

impl WeatherClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            cache: WeatherCache::new(),
            base_url,
            api_key,
            timeout,
        }
    }

    pub async fn fetch(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let cache_key = WeatherCache::key_for(location);
        if let Some(report) = self.cache.lookup(&cache_key) {
            return Ok(report);
        }

        // Credential check happens before any network attempt and is final
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(WeatherError::MissingApiKey)?;

        let response = self.send_with_retry(location, api_key).await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: UpstreamWeather = response
            .json()
            .await
            .map_err(|err| WeatherError::Shape(err.to_string()))?;
        let report = normalize(payload)?;

        self.cache.store(cache_key, report.clone());
        Ok(report)
    }

    // Bounded-attempt loop with constant backoff. A response with a
    // non-retryable status is handed back as-is; exhausted timeouts and
    // transport failures become errors here. Every attempt records one
    // latency observation and one outcome-labeled counter increment.
    async fn send_with_retry(
        &self,
        location: &str,
        api_key: &str,
    ) -> Result<reqwest::Response, WeatherError> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let start = Instant::now();
            let result = self
                .http
                .get(&self.base_url)
                .query(&[("q", location), ("appid", api_key), ("units", "metric")])
                .timeout(self.timeout)
                .send()
                .await;
            let outcome = AttemptOutcome::classify(result);

            UPSTREAM_LATENCY.observe(start.elapsed().as_secs_f64());
            UPSTREAM_REQUESTS
                .with_label_values(&[&outcome.metric_label()])
                .inc();

            if outcome.retryable() && attempt < MAX_ATTEMPTS {
                debug!(location, attempt, "retrying upstream weather call");
                tokio::time::sleep(RETRY_BACKOFF).await;
                continue;
            }

            return match outcome {
                AttemptOutcome::Response(response) => Ok(response),
                AttemptOutcome::Timeout => Err(WeatherError::Timeout),
                AttemptOutcome::Network(err) => Err(WeatherError::Network(err)),
            };
        }
    }
}

fn normalize(payload: UpstreamWeather) -> Result<WeatherReport, WeatherError> {
    let conditions = payload
        .weather
        .first()
        .map(|condition| condition.description.clone())
        .ok_or_else(|| WeatherError::Shape("empty weather conditions array".to_string()))?;

    Ok(WeatherReport {
        temperature: payload.main.temp,
        conditions,
        humidity: payload.main.humidity,
        wind_speed: payload.wind.speed,
    })
}
