//! Background Tasks Module
//!
//! Detached tasks that run alongside request handling.
//!
//! # Tasks
//! - Download tracking: notifies the photo API that a photo was shown

mod tracking;

pub use tracking::spawn_download_tracking;
