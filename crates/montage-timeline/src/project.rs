//! Project and settings types.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use montage_core::{FrameRate, MontageError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clip::Clip;
use crate::effect::Effect;
use crate::overlay::TextOverlay;
use crate::serialization::CURRENT_VERSION;
use crate::track::Track;
use crate::transition::Transition;

/// Output format of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Output frame rate
    pub frame_rate: FrameRate,
    /// Audio sample rate in Hz
    pub sample_rate: u32,
}

impl ProjectSettings {
    /// 1080p at 30 fps, 48 kHz audio.
    pub const HD_1080P: Self = Self {
        width: 1920,
        height: 1080,
        frame_rate: FrameRate::FPS_30,
        sample_rate: 48_000,
    };

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Reject settings no output could be produced from.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 || self.sample_rate == 0 {
            return Err(MontageError::InvalidConfiguration);
        }
        if !self.frame_rate.is_valid() {
            return Err(MontageError::InvalidConfiguration);
        }
        Ok(())
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self::HD_1080P
    }
}

/// A clip that is on screen at a given project time.
#[derive(Debug, Clone, Copy)]
pub struct ActiveClip<'a> {
    /// Owning track ID
    pub track_id: Uuid,
    /// Index of the track in the project (compositing order)
    pub track_index: usize,
    /// The clip itself
    pub clip: &'a Clip,
    /// Time elapsed since the clip started on its track
    pub offset: f64,
    /// Corresponding time inside the clip's source media
    pub source_time: f64,
}

/// A project: tracks played in parallel, plus project-level metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Output format
    pub settings: ProjectSettings,
    /// Tracks, bottom-most first
    pub tracks: Vec<Track>,
    /// Titles drawn over the composited output
    pub text_overlays: Vec<TextOverlay>,
    /// Transitions between clips
    pub transitions: Vec<Transition>,
    /// Color filter applied to the composited output
    pub global_filter: Option<Effect>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last successful edit
    pub modified_at: DateTime<Utc>,
    /// Document schema version, carried through load and save untouched
    pub version: i64,
}

impl Project {
    /// Create a new empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_settings(name, ProjectSettings::default())
    }

    /// Create a new empty project with explicit output settings.
    pub fn with_settings(name: impl Into<String>, settings: ProjectSettings) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            settings,
            tracks: Vec::new(),
            text_overlays: Vec::new(),
            transitions: Vec::new(),
            global_filter: None,
            created_at: now,
            modified_at: now,
            version: CURRENT_VERSION,
        }
    }

    /// Mark the project as modified now.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Canvas aspect ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.settings.aspect_ratio()
    }

    /// Add a track on top of the existing ones.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
        self.touch();
    }

    /// Remove a track by ID.
    pub fn remove_track(&mut self, id: Uuid) -> Option<Track> {
        let index = self.tracks.iter().position(|track| track.id == id)?;
        let removed = self.tracks.remove(index);
        self.touch();
        Some(removed)
    }

    /// Find a track by ID.
    pub fn track(&self, id: Uuid) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == id)
    }

    /// Find a track mutably by ID.
    pub fn track_mut(&mut self, id: Uuid) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|track| track.id == id)
    }

    /// Get the total duration of the project: its longest track.
    pub fn total_duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(Track::total_duration)
            .fold(0.0, f64::max)
    }

    /// Group clips on one track into a compound clip. See [`Track::group_clips`].
    pub fn group_clips(&mut self, ids: &HashSet<Uuid>, track_id: Uuid) -> Option<&Clip> {
        let track = self.tracks.iter_mut().find(|track| track.id == track_id)?;
        let compound = track.group_clips(ids)?;
        self.modified_at = Utc::now();
        Some(compound)
    }

    /// Ungroup a compound clip on one track. See [`Track::ungroup_compound_clip`].
    pub fn ungroup_compound_clip(&mut self, id: Uuid, track_id: Uuid) -> Option<&[Clip]> {
        let track = self.tracks.iter_mut().find(|track| track.id == track_id)?;
        let restored = track.ungroup_compound_clip(id)?;
        self.modified_at = Utc::now();
        Some(restored)
    }

    /// Split a clip on one track. See [`Track::split_clip`].
    pub fn split_clip(&mut self, id: Uuid, offset: f64, track_id: Uuid) -> Option<(Uuid, Uuid)> {
        let halves = self.track_mut(track_id)?.split_clip(id, offset)?;
        self.touch();
        Some(halves)
    }

    /// Locate a clip anywhere on the top-level tracks. Returns (track index, clip index).
    pub fn find_clip(&self, id: Uuid) -> Option<(usize, usize)> {
        self.tracks
            .iter()
            .enumerate()
            .find_map(|(t, track)| track.find_clip(id).map(|(c, _)| (t, c)))
    }

    /// Every clip on a visible track that plays at `time`, in track order.
    pub fn active_clips_at(&self, time: f64) -> Vec<ActiveClip<'_>> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| track.is_visible)
            .filter_map(|(track_index, track)| {
                let (clip_index, offset) = track.clip_index_at(time)?;
                let clip = &track.clips[clip_index];
                Some(ActiveClip {
                    track_id: track.id,
                    track_index,
                    clip,
                    offset,
                    source_time: clip.time_range.start + offset,
                })
            })
            .collect()
    }

    /// Add a transition.
    pub fn add_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
        self.touch();
    }

    /// Remove a transition by ID.
    pub fn remove_transition(&mut self, id: Uuid) -> Option<Transition> {
        let index = self.transitions.iter().position(|t| t.id == id)?;
        let removed = self.transitions.remove(index);
        self.touch();
        Some(removed)
    }

    /// Transitions that start or end on the given clip.
    pub fn transitions_for_clip(&self, clip_id: Uuid) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.touches(clip_id))
    }

    /// Add a text overlay.
    pub fn add_text_overlay(&mut self, overlay: TextOverlay) {
        self.text_overlays.push(overlay);
        self.touch();
    }

    /// Remove a text overlay by ID.
    pub fn remove_text_overlay(&mut self, id: Uuid) -> Option<TextOverlay> {
        let index = self.text_overlays.iter().position(|o| o.id == id)?;
        let removed = self.text_overlays.remove(index);
        self.touch();
        Some(removed)
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new("Untitled Project")
    }
}
