//! Scoped request throttling.
//!
//! The drone and pilot endpoint trees each get their own rate budget,
//! enforced per client with a token bucket: tokens refill at a fixed rate
//! per second and each request costs one token. Requests with no tokens
//! left are rejected with 429.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;

use crate::model::{api::ErrorDto, app::AppState};

/// Throttle scopes, matching the endpoint groups that carry a rate budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleScope {
    Drones,
    Pilots,
}

impl ThrottleScope {
    /// Scope for a request path, or None for unthrottled trees.
    ///
    /// Both the v1 and v2 spellings of the drone collection map to the same
    /// scope so a client cannot double its budget by switching versions.
    pub fn for_path(path: &str) -> Option<Self> {
        for segment in path.split('/') {
            match segment {
                "drones" | "vehicles" => return Some(Self::Drones),
                "pilots" => return Some(Self::Pilots),
                _ => {}
            }
        }

        None
    }
}

/// Token bucket rate limiter.
struct TokenBucket {
    tokens: f32,
    last_check: Instant,
    rate: f32,
    capacity: f32,
}

impl TokenBucket {
    fn new(rate: f32, capacity: f32) -> Self {
        Self {
            tokens: capacity,
            last_check: Instant::now(),
            rate,
            capacity,
        }
    }

    /// Returns `true` if the request is allowed (token consumed),
    /// `false` if the rate limit is exceeded.
    fn check(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_check).as_secs_f32();
        self.last_check = now;

        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Per-scope, per-client token buckets shared across the server.
pub struct ThrottleRegistry {
    buckets: DashMap<(ThrottleScope, String), TokenBucket>,
    drones_per_minute: u32,
    pilots_per_minute: u32,
}

impl ThrottleRegistry {
    pub fn new(drones_per_minute: u32, pilots_per_minute: u32) -> Self {
        Self {
            buckets: DashMap::new(),
            drones_per_minute,
            pilots_per_minute,
        }
    }

    /// Spend one token from the client's bucket for the scope.
    pub fn check(&self, scope: ThrottleScope, key: &str) -> bool {
        let per_minute = match scope {
            ThrottleScope::Drones => self.drones_per_minute,
            ThrottleScope::Pilots => self.pilots_per_minute,
        };

        let mut bucket = self
            .buckets
            .entry((scope, key.to_owned()))
            .or_insert_with(|| TokenBucket::new(per_minute as f32 / 60.0, per_minute as f32));

        bucket.check()
    }
}

/// Middleware rejecting requests that exceed their scope's rate budget.
pub async fn throttle_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(scope) = ThrottleScope::for_path(request.uri().path()) else {
        return next.run(request).await;
    };

    let key = client_key(&request);

    if state.throttle.check(scope, &key) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "request throttled");

        (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorDto {
                error: "Request was throttled.".to_string(),
            }),
        )
            .into_response()
    }
}

/// Authenticated clients are keyed by their Authorization header,
/// anonymous clients by peer address.
fn client_key(request: &Request) -> String {
    if let Some(value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        return value.to_owned();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}
