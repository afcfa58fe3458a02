//! Track types for the timeline.
//!
//! A track is an ordered run of abutting clips. Positions are never stored:
//! the clip at index N starts at the summed duration of clips `0..N`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;
use uuid::Uuid;

use crate::clip::{Clip, ClipKind};

/// Kind of track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackKind {
    Video,
    Audio,
    Overlay,
}

/// A track containing clips.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Unique track ID
    pub id: Uuid,
    /// Track name
    pub name: String,
    /// Track kind
    pub kind: TrackKind,
    /// Clips in playback order
    pub clips: Vec<Clip>,
    /// Is track muted
    pub is_muted: bool,
    /// Is track locked (UI refuses edits)
    pub is_locked: bool,
    /// Is track shown by the compositor
    pub is_visible: bool,
    /// Track volume (1.0 = unity)
    pub volume: f32,
}

impl Track {
    /// Create an empty track.
    pub fn new(kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            clips: Vec::new(),
            is_muted: false,
            is_locked: false,
            is_visible: true,
            volume: 1.0,
        }
    }

    /// Create a new video track.
    pub fn new_video(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Video, name)
    }

    /// Create a new audio track.
    pub fn new_audio(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Audio, name)
    }

    /// Create a new overlay track.
    pub fn new_overlay(name: impl Into<String>) -> Self {
        Self::new(TrackKind::Overlay, name)
    }

    /// Get the total duration of this track.
    pub fn total_duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }

    /// Add a clip to the end of the track.
    pub fn add_clip(&mut self, clip: Clip) {
        self.clips.push(clip);
    }

    /// Insert a clip at the given index.
    pub fn insert_clip(&mut self, index: usize, clip: Clip) {
        let index = index.min(self.clips.len());
        self.clips.insert(index, clip);
    }

    /// Remove the first clip with the given ID.
    pub fn remove_clip(&mut self, id: Uuid) -> Option<Clip> {
        let index = self.clips.iter().position(|clip| clip.id == id)?;
        Some(self.clips.remove(index))
    }

    /// Move the clip at `from` so that it ends up at index `to`.
    ///
    /// Every clip between the two indices shifts in time. Returns false, and
    /// leaves the track alone, if either index is out of range.
    pub fn move_clip(&mut self, from: usize, to: usize) -> bool {
        if from >= self.clips.len() || to >= self.clips.len() {
            return false;
        }
        let clip = self.clips.remove(from);
        self.clips.insert(to, clip);
        true
    }

    /// Find a clip by UUID. Returns (index, &Clip).
    pub fn find_clip(&self, id: Uuid) -> Option<(usize, &Clip)> {
        self.clips
            .iter()
            .enumerate()
            .find(|(_, clip)| clip.id == id)
    }

    /// Find a clip mutably by UUID. Returns (index, &mut Clip).
    pub fn find_clip_mut(&mut self, id: Uuid) -> Option<(usize, &mut Clip)> {
        self.clips
            .iter_mut()
            .enumerate()
            .find(|(_, clip)| clip.id == id)
    }

    /// Get the timeline start time of the clip at the given index.
    pub fn clip_start_time(&self, index: usize) -> f64 {
        let end = index.min(self.clips.len());
        self.clips[..end].iter().map(Clip::duration).sum()
    }

    /// Find which clip plays at the given time. Returns (index, time_within_clip).
    ///
    /// Windows are half-open, so a time on a cut belongs to the later clip.
    pub fn clip_index_at(&self, time: f64) -> Option<(usize, f64)> {
        let mut pos = 0.0;
        for (i, clip) in self.clips.iter().enumerate() {
            let end = pos + clip.duration();
            if time >= pos && time < end {
                return Some((i, time - pos));
            }
            pos = end;
        }
        None
    }

    /// The clip playing at the given time, if any.
    pub fn clip_at(&self, time: f64) -> Option<&Clip> {
        self.clip_index_at(time).map(|(i, _)| &self.clips[i])
    }

    /// Split a clip in place. Returns the IDs of the two halves.
    pub fn split_clip(&mut self, id: Uuid, offset: f64) -> Option<(Uuid, Uuid)> {
        let (index, clip) = self.find_clip(id)?;
        let (first, second) = clip.split(offset)?;
        let ids = (first.id, second.id);

        self.clips.splice(index..=index, [first, second]);
        debug!(track = %self.id, clip = %id, offset, "Split clip");
        Some(ids)
    }

    /// Divide the track at `time` into the content before and after it.
    ///
    /// A clip straddling the cut is split. The first track keeps this
    /// track's ID, the second gets a fresh one.
    pub(crate) fn split_at(&self, time: f64) -> (Track, Track) {
        let mut before = self.empty_copy(self.id);
        let mut after = self.empty_copy(Uuid::new_v4());

        let mut pos = 0.0;
        for clip in &self.clips {
            let end = pos + clip.duration();
            if end <= time {
                before.clips.push(clip.clone());
            } else if pos >= time {
                after.clips.push(clip.clone());
            } else if let Some((head, tail)) = clip.split(time - pos) {
                before.clips.push(head);
                after.clips.push(tail);
            } else {
                after.clips.push(clip.clone());
            }
            pos = end;
        }
        (before, after)
    }

    fn empty_copy(&self, id: Uuid) -> Track {
        Track {
            id,
            name: self.name.clone(),
            kind: self.kind,
            clips: Vec::new(),
            is_muted: self.is_muted,
            is_locked: self.is_locked,
            is_visible: self.is_visible,
            volume: self.volume,
        }
    }

    /// Replace the clips whose IDs are in `ids` with one compound clip.
    ///
    /// At least two clips must match; otherwise nothing changes and `None` is
    /// returned. The compound keeps the matched clips in track order, takes
    /// the slot of the earliest one, and lasts exactly as long as they did.
    pub fn group_clips(&mut self, ids: &HashSet<Uuid>) -> Option<&Clip> {
        let matched: SmallVec<[usize; 8]> = self
            .clips
            .iter()
            .enumerate()
            .filter(|(_, clip)| ids.contains(&clip.id))
            .map(|(i, _)| i)
            .collect();

        if matched.len() < 2 {
            debug!(track = %self.id, matched = matched.len(), "Grouping needs at least two clips");
            return None;
        }
        let insert_at = matched[0];

        let (grouped, remaining): (Vec<Clip>, Vec<Clip>) = std::mem::take(&mut self.clips)
            .into_iter()
            .partition(|clip| ids.contains(&clip.id));
        self.clips = remaining;

        // `grouped` is non-empty here, so the compound always exists.
        let compound = Clip::make_compound(grouped, self.kind)?;
        debug!(
            track = %self.id,
            compound = %compound.id,
            clips = matched.len(),
            duration = compound.duration(),
            "Grouped clips"
        );

        self.clips.insert(insert_at, compound);
        self.clips.get(insert_at)
    }

    /// Replace a compound clip with the clips of its first nested track.
    ///
    /// Undoes one level of grouping. Returns the restored clips, or `None` if
    /// the clip is missing, not compound, or has no sub-timeline.
    pub fn ungroup_compound_clip(&mut self, id: Uuid) -> Option<&[Clip]> {
        let index = self.clips.iter().position(|clip| clip.id == id)?;
        let ClipKind::Compound(tracks) = &mut self.clips[index].kind else {
            debug!(track = %self.id, clip = %id, "Ungroup target is not compound");
            return None;
        };
        let inner = tracks.first_mut()?;

        let restored = std::mem::take(&mut inner.clips);
        let count = restored.len();
        self.clips.splice(index..=index, restored);

        debug!(track = %self.id, compound = %id, clips = count, "Ungrouped compound clip");
        Some(&self.clips[index..index + count])
    }

    /// Number of clips in this track.
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}
