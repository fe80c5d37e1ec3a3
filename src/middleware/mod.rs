pub mod cors;
pub mod rate_limit;

// Re-export middleware builders
pub use cors::cors_layer;
pub use rate_limit::{RATE_LIMIT_DISABLED_THRESHOLD, RateLimitLayer, rate_limit_layer};
