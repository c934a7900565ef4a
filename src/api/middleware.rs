use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Token-bucket rate limiter keyed by client IP.
pub type IpRateLimiter = DefaultKeyedRateLimiter<IpAddr>;

/// Build a per-IP limiter allowing `per_second` requests each second.
pub fn ip_rate_limiter(per_second: u32) -> Arc<IpRateLimiter> {
    let quota = Quota::per_second(NonZeroU32::new(per_second).unwrap_or(NonZeroU32::MIN));
    Arc::new(RateLimiter::keyed(quota))
}

/// Reject requests beyond the per-IP budget with 429. Requests carrying
/// no connection info (e.g. in-process tests) fall back to the loopback
/// key.
pub async fn rate_limit(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));

    match limiter.check_key(&ip) {
        Ok(_) => next.run(request).await,
        Err(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            "You have reached maximum request limit.",
        )
            .into_response(),
    }
}
