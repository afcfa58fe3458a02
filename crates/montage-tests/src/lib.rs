//! Integration test crate for Montage.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the montage crates to verify they work together.

#[cfg(test)]
mod timeline;
