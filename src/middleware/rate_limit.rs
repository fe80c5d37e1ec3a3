use std::time::Duration;

use anyhow::anyhow;
use governor::middleware::NoOpMiddleware;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};
use tracing::info;

use crate::config::ServerConfig;

/// Rates at or above this many requests per second disable the limiter
pub const RATE_LIMIT_DISABLED_THRESHOLD: u32 = 100_000;

/// Per-IP rate limiting layer keyed on `x-forwarded-for` / `x-real-ip` /
/// `forwarded`, falling back to the peer address
pub type RateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, axum::body::Body>;

/// Interval after which one request of the quota is replenished
fn replenish_period(requests_per_second: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(requests_per_second.max(1)))
}

/// Build the rate limiting layer from the configuration
///
/// Each client IP may send `rate_limit_burst_size` requests at once and
/// `rate_limit_requests_per_second` sustained. Returns `None` when the rate is
/// at or above [`RATE_LIMIT_DISABLED_THRESHOLD`].
pub fn rate_limit_layer(config: &ServerConfig) -> anyhow::Result<Option<RateLimitLayer>> {
    let requests_per_second = config.rate_limit_requests_per_second;
    if requests_per_second >= RATE_LIMIT_DISABLED_THRESHOLD {
        info!("Rate limiting disabled (rate >= {RATE_LIMIT_DISABLED_THRESHOLD}/s)");
        return Ok(None);
    }

    let governor_config = GovernorConfigBuilder::default()
        .period(replenish_period(requests_per_second))
        .burst_size(config.rate_limit_burst_size)
        .key_extractor(SmartIpKeyExtractor)
        .finish()
        .ok_or_else(|| {
            anyhow!(
                "Invalid rate limit: {} requests/s with burst {}",
                requests_per_second,
                config.rate_limit_burst_size
            )
        })?;

    info!(
        requests_per_second,
        burst_size = config.rate_limit_burst_size,
        "Rate limiting enabled"
    );
    Ok(Some(GovernorLayer::new(governor_config)))
}
