//! Background Module
//!
//! Picks the decorative page background for a weather condition: normalizes
//! the condition, consults the bounded cache and, when the photo API still
//! has headroom, fetches a fresh photo.

pub mod normalize;
pub mod rate_limit;
pub mod service;

pub use normalize::normalize_condition;
pub use rate_limit::RateLimitGuard;
pub use service::BackgroundService;
