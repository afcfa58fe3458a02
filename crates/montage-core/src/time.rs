//! Time representation for the timeline model.
//!
//! All time values are seconds as `f64`. A [`TimeRange`] is a half-open
//! interval `[start, start + duration)`; for clips, `start` is the trim-in
//! point inside the source media, not a position on the track.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Frame rate as a rational number (e.g., 30000/1001 for 29.97 fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRate {
    /// Numerator (e.g., 30000)
    pub numerator: u32,
    /// Denominator (e.g., 1001)
    pub denominator: u32,
}

impl FrameRate {
    /// Create a new frame rate.
    #[inline]
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Convert to frames per second as f64.
    #[inline]
    pub fn to_fps_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Duration of a single frame in seconds.
    #[inline]
    pub fn frame_duration(self) -> f64 {
        self.denominator as f64 / self.numerator as f64
    }

    /// A rate with a zero term cannot be played back.
    pub fn is_valid(self) -> bool {
        self.numerator > 0 && self.denominator > 0
    }

    /// Common frame rates
    pub const FPS_23_976: Self = Self::new(24000, 1001);
    pub const FPS_24: Self = Self::new(24, 1);
    pub const FPS_25: Self = Self::new(25, 1);
    pub const FPS_29_97: Self = Self::new(30000, 1001);
    pub const FPS_30: Self = Self::new(30, 1);
    pub const FPS_60: Self = Self::new(60, 1);
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_30
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fps = self.to_fps_f64();
        if (fps - fps.round()).abs() < 0.001 {
            write!(f, "{} fps", fps.round() as u32)
        } else {
            write!(f, "{:.3} fps", fps)
        }
    }
}

/// A time range with inclusive start and exclusive end.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start time in seconds (inclusive)
    pub start: f64,
    /// Duration of the range in seconds
    pub duration: f64,
}

impl TimeRange {
    /// The empty range at zero.
    pub const ZERO: Self = Self {
        start: 0.0,
        duration: 0.0,
    };

    /// Create a new time range from start and duration.
    #[inline]
    pub const fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Create a time range from start and end times.
    #[inline]
    pub fn from_start_end(start: f64, end: f64) -> Self {
        Self {
            start,
            duration: end - start,
        }
    }

    /// End time (exclusive).
    #[inline]
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Check if a time is within this range.
    #[inline]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time < self.end()
    }

    /// Check if two ranges share a non-zero span. Ranges that only touch at a
    /// boundary do not overlap.
    pub fn overlaps(self, other: Self) -> bool {
        self.start.max(other.start) < self.end().min(other.end())
    }

    /// Compute the intersection of two ranges, if any.
    pub fn intersection(self, other: Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self::from_start_end(
            self.start.max(other.start),
            self.end().min(other.end()),
        ))
    }

    /// True when the range covers no time.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.duration <= 0.0
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}s, {:.3}s)", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_time_range_overlap() {
        let a = TimeRange::new(0.0, 10.0);
        let b = TimeRange::new(5.0, 10.0);
        assert!(a.overlaps(b));

        let intersection = a.intersection(b).unwrap();
        assert_eq!(intersection.start, 5.0);
        assert_eq!(intersection.duration, 5.0);
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        let a = TimeRange::new(0.0, 10.0);
        let b = TimeRange::new(10.0, 5.0);
        assert!(!a.overlaps(b));
        assert!(!b.overlaps(a));
        assert!(a.intersection(b).is_none());
    }

    #[test]
    fn test_empty_range_overlaps_nothing() {
        let a = TimeRange::new(0.0, 10.0);
        let point = TimeRange::new(5.0, 0.0);
        assert!(!a.overlaps(point));
        assert!(point.is_empty());
        assert!(!TimeRange::ZERO.contains(0.0));
    }

    #[test]
    fn test_end_and_display() {
        let r = TimeRange::new(1.5, 2.0);
        assert_eq!(r.end(), 3.5);
        assert_eq!(r.to_string(), "[1.500s, 3.500s)");
        assert_eq!(TimeRange::from_start_end(2.0, 6.0), TimeRange::new(2.0, 4.0));
    }

    #[test]
    fn test_frame_rate_29_97() {
        let rate = FrameRate::FPS_29_97;
        assert!((rate.to_fps_f64() - 29.97).abs() < 0.001);
        assert_eq!(rate.to_string(), "29.970 fps");
        assert_eq!(FrameRate::FPS_24.to_string(), "24 fps");
        assert!(!FrameRate::new(0, 1).is_valid());
    }

    proptest! {
        #[test]
        fn prop_contains_is_half_open(start in 0.0f64..10_000.0, duration in 0.001f64..10_000.0) {
            let r = TimeRange::new(start, duration);
            let eps = duration * 1e-3;
            prop_assert!(r.contains(start));
            prop_assert!(r.contains(start + duration - eps));
            prop_assert!(!r.contains(start + duration));
            prop_assert!(!r.contains(start - eps));
        }

        #[test]
        fn prop_overlap_is_symmetric(
            a_start in 0.0f64..100.0,
            a_dur in 0.0f64..100.0,
            b_start in 0.0f64..100.0,
            b_dur in 0.0f64..100.0,
        ) {
            let a = TimeRange::new(a_start, a_dur);
            let b = TimeRange::new(b_start, b_dur);
            prop_assert_eq!(a.overlaps(b), b.overlaps(a));
            prop_assert_eq!(a.overlaps(b), a.intersection(b).is_some());
        }
    }
}
