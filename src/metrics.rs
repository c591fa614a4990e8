use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Histogram, HistogramVec, register_counter, register_counter_vec,
    register_histogram, register_histogram_vec,
};

lazy_static! {
    pub static ref HTTP_REQUESTS: CounterVec = register_counter_vec!(
        "http_requests_total",
        "Total HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();
    pub static ref RATE_LIMIT_ALLOWED: Counter = register_counter!(
        "rate_limit_allowed_total",
        "Requests allowed by rate limiter"
    )
    .unwrap();
    pub static ref RATE_LIMIT_BLOCKED: Counter = register_counter!(
        "rate_limit_blocked_total",
        "Requests blocked by rate limiter"
    )
    .unwrap();
    pub static ref CACHE_HITS: Counter = register_counter!(
        "weather_cache_hits_total",
        "Total cache hits for weather lookups"
    )
    .unwrap();
    pub static ref CACHE_MISSES: Counter = register_counter!(
        "weather_cache_misses_total",
        "Total cache misses for weather lookups"
    )
    .unwrap();
    pub static ref UPSTREAM_REQUESTS: CounterVec = register_counter_vec!(
        "weather_upstream_requests_total",
        "Total upstream weather API requests",
        &["status"]
    )
    .unwrap();
    pub static ref UPSTREAM_LATENCY: Histogram = register_histogram!(
        "weather_upstream_latency_seconds",
        "Latency of upstream weather API requests in seconds",
        vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();
}
