//! Montage Core - Foundation types for the timeline model
//!
//! This crate provides the leaf value types used throughout Montage:
//! - Time representation (TimeRange, FrameRate)
//! - Spatial clip transforms and their compositor matrices
//! - The typed error returned by resource and I/O operations

pub mod error;
pub mod geometry;
pub mod time;

pub use error::{MontageError, Result};
pub use geometry::Transform;
pub use time::{FrameRate, TimeRange};
