//! Project-level text overlays.

use montage_core::TimeRange;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// A title drawn over the composited tracks.
///
/// Unlike clips, overlays are placed at an absolute project time.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Unique overlay ID
    pub id: Uuid,
    /// Text to draw
    pub text: String,
    /// Placement on the project timeline
    pub time_range: TimeRange,
    /// Normalized horizontal canvas position
    pub position_x: f64,
    /// Normalized vertical canvas position
    pub position_y: f64,
    /// Font family name
    pub font_name: String,
    /// Font size in points
    pub font_size: f64,
    /// `#RRGGBBAA`
    pub color: String,
    /// Horizontal text alignment
    pub alignment: TextAlignment,
}

impl TextOverlay {
    /// Create a centered white title.
    pub fn new(text: impl Into<String>, time_range: TimeRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            time_range,
            position_x: 0.5,
            position_y: 0.5,
            font_name: "Helvetica".to_string(),
            font_size: 48.0,
            color: "#FFFFFFFF".to_string(),
            alignment: TextAlignment::Center,
        }
    }

    /// Check whether the overlay is on screen at a project time.
    pub fn is_visible_at(&self, time: f64) -> bool {
        self.time_range.contains(time)
    }
}
