//! Montage Timeline - Timeline data model
//!
//! Implements the timeline structure for video editing:
//! - Projects containing tracks played in parallel
//! - Tracks containing abutting clips, positioned by order
//! - Compound clips nesting whole tracks, with grouping and ungrouping
//! - A versioned JSON project document

pub mod clip;
pub mod effect;
pub mod media;
pub mod overlay;
pub mod project;
pub mod serialization;
pub mod shared;
pub mod track;
pub mod transition;

pub use clip::{Clip, ClipKind, ClipType};
pub use effect::{Effect, EffectKind};
pub use media::{commit_trim, validate_trim, MediaInfo, MediaResolver};
pub use overlay::{TextAlignment, TextOverlay};
pub use project::{ActiveClip, Project, ProjectSettings};
pub use serialization::CURRENT_VERSION;
pub use shared::SharedProject;
pub use track::{Track, TrackKind};
pub use transition::{Transition, TransitionKind};
