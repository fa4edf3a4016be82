//! Request and Response models for the dashboard API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{BackgroundQuery, Location, LocationQuery, PhotoQuery};
pub use responses::{Background, ErrorResponse, HealthResponse, PhotoResponse, StatsResponse};
