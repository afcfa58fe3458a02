//! Clip types for the timeline.

use montage_core::{TimeRange, Transform};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::Effect;
use crate::track::{Track, TrackKind};

/// Plain clip type tag, as written to project documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClipType {
    Video,
    Audio,
    Image,
    Text,
    Compound,
}

impl ClipType {
    /// Default display name for new clips of this type.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "Video Clip",
            Self::Audio => "Audio Clip",
            Self::Image => "Image",
            Self::Text => "Text",
            Self::Compound => "Compound Clip",
        }
    }
}

/// What a clip holds. Only the compound variant carries nested tracks.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipKind {
    Video,
    Audio,
    Image,
    Text,
    /// Sub-timeline of the compound clip. Empty means no sub-timeline.
    Compound(Vec<Track>),
}

impl ClipKind {
    /// The plain type tag of this kind.
    pub fn clip_type(&self) -> ClipType {
        match self {
            Self::Video => ClipType::Video,
            Self::Audio => ClipType::Audio,
            Self::Image => ClipType::Image,
            Self::Text => ClipType::Text,
            Self::Compound(_) => ClipType::Compound,
        }
    }
}

impl From<ClipType> for ClipKind {
    fn from(clip_type: ClipType) -> Self {
        match clip_type {
            ClipType::Video => Self::Video,
            ClipType::Audio => Self::Audio,
            ClipType::Image => Self::Image,
            ClipType::Text => Self::Text,
            ClipType::Compound => Self::Compound(Vec::new()),
        }
    }
}

/// A clip on the timeline.
///
/// Clips do not store their track position: it is the sum of the durations of
/// the clips before them on the owning track.
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    /// Unique clip ID
    pub id: Uuid,
    /// Clip name (displayed in UI)
    pub name: String,
    /// Clip variant
    pub kind: ClipKind,
    /// Trim window inside the source media
    pub time_range: TimeRange,
    /// Source media locator
    pub source: Option<String>,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
    /// Audio gain (1.0 = unity)
    pub volume: f32,
    /// Playback speed (1.0 = normal)
    pub speed: f32,
    /// Placement on the canvas
    pub transform: Transform,
    /// Effects, applied in order
    pub effects: Vec<Effect>,
    /// Primary color filter
    pub filter: Option<Effect>,
    /// Is clip audio muted
    pub is_muted: bool,
}

impl Clip {
    /// Create a clip with default playback settings.
    pub fn new(clip_type: ClipType, time_range: TimeRange) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: clip_type.label().to_string(),
            kind: clip_type.into(),
            time_range,
            source: None,
            opacity: 1.0,
            volume: 1.0,
            speed: 1.0,
            transform: Transform::IDENTITY,
            effects: Vec::new(),
            filter: None,
            is_muted: false,
        }
    }

    /// Builder-style source locator.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Builder-style display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The plain type tag.
    pub fn clip_type(&self) -> ClipType {
        self.kind.clip_type()
    }

    pub fn is_compound(&self) -> bool {
        matches!(self.kind, ClipKind::Compound(_))
    }

    /// Length of the clip on its track.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.time_range.duration
    }

    /// Get the source out point.
    pub fn source_out(&self) -> f64 {
        self.time_range.end()
    }

    /// Overwrite the trim window. No check against the real media length is
    /// made here; see [`crate::media::commit_trim`] for a validated variant.
    pub fn trim(&mut self, start: f64, duration: f64) {
        self.time_range = TimeRange::new(start, duration);
    }

    /// Cut the clip `offset` seconds into its trim window.
    ///
    /// Returns `None` unless `0 < offset < duration`. Both halves get fresh
    /// IDs and otherwise copy every field of `self`.
    ///
    /// A compound clip has its nested tracks cut at the same point instead of
    /// copied: the first half keeps the nested content before the cut, the
    /// second half the content after it, re-based to start at zero. No nested
    /// clip ends up in both halves.
    pub fn split(&self, offset: f64) -> Option<(Clip, Clip)> {
        let inside = offset > 0.0 && offset < self.time_range.duration;
        if !inside {
            return None;
        }

        let cut = self.time_range.start + offset;
        let (first_kind, second_kind, second_start) = match &self.kind {
            ClipKind::Compound(tracks) if !tracks.is_empty() => {
                let (early, late): (Vec<Track>, Vec<Track>) =
                    tracks.iter().map(|track| track.split_at(cut)).unzip();
                (ClipKind::Compound(early), ClipKind::Compound(late), 0.0)
            }
            kind => (kind.clone(), kind.clone(), cut),
        };

        let first = self.part(first_kind, TimeRange::new(self.time_range.start, offset));
        let second = self.part(
            second_kind,
            TimeRange::new(second_start, self.time_range.duration - offset),
        );
        Some((first, second))
    }

    /// Copy of `self` with a fresh ID, the given content and trim window.
    fn part(&self, kind: ClipKind, time_range: TimeRange) -> Clip {
        Clip {
            id: Uuid::new_v4(),
            name: self.name.clone(),
            kind,
            time_range,
            source: self.source.clone(),
            opacity: self.opacity,
            volume: self.volume,
            speed: self.speed,
            transform: self.transform,
            effects: self.effects.clone(),
            filter: self.filter.clone(),
            is_muted: self.is_muted,
        }
    }

    /// Wrap `clips` into a new compound clip with a single inner track.
    ///
    /// The compound starts at zero and lasts as long as its contents. Returns
    /// `None` for an empty input.
    pub fn make_compound(clips: Vec<Clip>, track_kind: TrackKind) -> Option<Clip> {
        if clips.is_empty() {
            return None;
        }

        let mut inner = Track::new(track_kind, "Compound Track");
        inner.clips = clips;
        let duration = inner.total_duration();

        let mut compound = Clip::new(ClipType::Compound, TimeRange::new(0.0, duration));
        compound.kind = ClipKind::Compound(vec![inner]);
        Some(compound)
    }

    /// Nested tracks of a compound clip.
    pub fn sub_timeline(&self) -> Option<&[Track]> {
        match &self.kind {
            ClipKind::Compound(tracks) if !tracks.is_empty() => Some(tracks),
            _ => None,
        }
    }

    /// Summed duration of the clips on the first nested track, 0 without a
    /// sub-timeline.
    pub fn sub_timeline_duration(&self) -> f64 {
        self.sub_timeline()
            .and_then(|tracks| tracks.first())
            .map_or(0.0, Track::total_duration)
    }

    /// Edit the first nested track of a compound clip, then re-derive this
    /// clip's duration from its contents.
    pub fn edit_sub_timeline<R>(&mut self, edit: impl FnOnce(&mut Track) -> R) -> Option<R> {
        let ClipKind::Compound(tracks) = &mut self.kind else {
            return None;
        };
        let inner = tracks.first_mut()?;
        let result = edit(inner);
        self.time_range.duration = inner.total_duration();
        Some(result)
    }

    /// Append an effect to the chain.
    pub fn add_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Remove the effect at `index`.
    pub fn remove_effect(&mut self, index: usize) -> Option<Effect> {
        if index < self.effects.len() {
            Some(self.effects.remove(index))
        } else {
            None
        }
    }

    /// Toggle one effect without removing it. Returns false for a bad index.
    pub fn set_effect_enabled(&mut self, index: usize, enabled: bool) -> bool {
        match self.effects.get_mut(index) {
            Some(effect) => {
                effect.is_enabled = enabled;
                true
            }
            None => false,
        }
    }
}
