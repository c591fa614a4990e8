use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, MatchedPath, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::{error, warn};

use crate::observability::RequestId;
use crate::rate_limit::RateLimitKey;
use crate::state::AppState;

// Generic client-facing failure; the concrete cause only goes to logs
const UPSTREAM_FAILURE_DETAIL: &str = "upstream weather service failure";

pub async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Path(location): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    matched_path: MatchedPath,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let key = RateLimitKey {
        client: addr.ip().to_string(),
        path: matched_path.as_str().to_owned(),
    };

    if !state.limiter.allow(key) {
        warn!(request_id = %request_id, client = %addr.ip(), "rate limited");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(
                header::RETRY_AFTER,
                state.limiter.retry_after_seconds().to_string(),
            )],
            Json(serde_json::json!({"detail": "rate limited"})),
        )
            .into_response();
    }

    match state.weather.fetch(&location).await {
        Ok(report) => Json(report).into_response(),
        Err(err) => {
            error!(
                request_id = %request_id,
                location = %location,
                error = %err,
                "upstream weather fetch failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({"detail": UPSTREAM_FAILURE_DETAIL})),
            )
                .into_response()
        }
    }
}
