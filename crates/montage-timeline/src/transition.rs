//! Transitions between adjacent clips.
//!
//! Transitions are not part of the track sequence; a project keeps them in a
//! sibling list and optionally records which two clips each one bridges.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    #[default]
    None,
    CrossDissolve,
    Fade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    WipeLeft,
    WipeRight,
    WipeUp,
    WipeDown,
    Zoom,
    Blur,
    Dissolve,
}

impl TransitionKind {
    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::CrossDissolve => "Cross Dissolve",
            Self::Fade => "Fade",
            Self::SlideLeft => "Slide Left",
            Self::SlideRight => "Slide Right",
            Self::SlideUp => "Slide Up",
            Self::SlideDown => "Slide Down",
            Self::WipeLeft => "Wipe Left",
            Self::WipeRight => "Wipe Right",
            Self::WipeUp => "Wipe Up",
            Self::WipeDown => "Wipe Down",
            Self::Zoom => "Zoom",
            Self::Blur => "Blur",
            Self::Dissolve => "Dissolve",
        }
    }
}

/// A transition instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Unique transition ID
    pub id: Uuid,
    /// Transition style
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    /// Duration in seconds
    pub duration: f64,
    /// Style-specific parameters
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    /// Outgoing clip
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "fromClipId")]
    pub from_clip: Option<Uuid>,
    /// Incoming clip
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "toClipId")]
    pub to_clip: Option<Uuid>,
}

impl Transition {
    /// Default transition length in seconds.
    pub const DEFAULT_DURATION: f64 = 1.0;

    /// Create an unattached transition.
    pub fn new(kind: TransitionKind, duration: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            duration,
            parameters: BTreeMap::new(),
            from_clip: None,
            to_clip: None,
        }
    }

    /// Create a transition bridging two clips.
    pub fn between(kind: TransitionKind, duration: f64, from: Uuid, to: Uuid) -> Self {
        Self {
            from_clip: Some(from),
            to_clip: Some(to),
            ..Self::new(kind, duration)
        }
    }

    /// Check whether this transition references the given clip.
    pub fn touches(&self, clip_id: Uuid) -> bool {
        self.from_clip == Some(clip_id) || self.to_clip == Some(clip_id)
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(TransitionKind::CrossDissolve, Self::DEFAULT_DURATION)
    }
}
