//! Project serialization.
//!
//! Projects are stored as camelCase JSON documents carrying a schema `version`
//! that is preserved on round trip. Clip track positions are written out as
//! `startTime` for readers that want absolute placement, and ignored on load:
//! the order of clips on a track is the only placement information.

use std::path::Path;

use chrono::{DateTime, Utc};
use montage_core::{MontageError, Result, TimeRange, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::clip::{Clip, ClipKind, ClipType};
use crate::effect::Effect;
use crate::overlay::{TextAlignment, TextOverlay};
use crate::project::{Project, ProjectSettings};
use crate::track::{Track, TrackKind};
use crate::transition::Transition;

/// Current schema version.
///
/// Loaded documents may carry any integer version; it is kept, not interpreted.
pub const CURRENT_VERSION: i64 = 1;

fn current_version() -> i64 {
    CURRENT_VERSION
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
    settings: ProjectSettings,
    tracks: Vec<TrackDocument>,
    #[serde(default)]
    text_overlays: Vec<TextOverlayDocument>,
    #[serde(default)]
    transitions: Vec<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    global_filter: Option<Effect>,
    #[serde(default = "current_version")]
    version: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackDocument {
    id: Uuid,
    name: String,
    #[serde(rename = "type")]
    kind: TrackKind,
    clips: Vec<ClipDocument>,
    is_muted: bool,
    is_locked: bool,
    is_visible: bool,
    volume: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClipDocument {
    id: Uuid,
    #[serde(rename = "sourceURL", default, skip_serializing_if = "Option::is_none")]
    source_url: Option<String>,
    source_time_range_start: f64,
    source_time_range_duration: f64,
    /// Derived track position; informational only.
    #[serde(default)]
    start_time: f64,
    #[serde(rename = "type")]
    clip_type: ClipType,
    name: String,
    volume: f32,
    speed: f32,
    #[serde(default)]
    is_muted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter: Option<Effect>,
    #[serde(default)]
    effects: Vec<Effect>,
    transform: TransformDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_timeline: Option<Vec<TrackDocument>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransformDocument {
    #[serde(flatten)]
    placement: Transform,
    opacity: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextOverlayDocument {
    id: Uuid,
    text: String,
    start_time: f64,
    duration: f64,
    position_x: f64,
    position_y: f64,
    font_name: String,
    font_size: f64,
    color: String,
    #[serde(default)]
    alignment: TextAlignment,
}

// ── Model → document ────────────────────────────────────────────

impl From<&Project> for ProjectDocument {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            created_at: project.created_at,
            modified_at: project.modified_at,
            settings: project.settings,
            tracks: project.tracks.iter().map(TrackDocument::from).collect(),
            text_overlays: project
                .text_overlays
                .iter()
                .map(TextOverlayDocument::from)
                .collect(),
            transitions: project.transitions.clone(),
            global_filter: project.global_filter.clone(),
            version: project.version,
        }
    }
}

impl From<&Track> for TrackDocument {
    fn from(track: &Track) -> Self {
        let mut position = 0.0;
        let clips = track
            .clips
            .iter()
            .map(|clip| {
                let doc = ClipDocument::new(clip, position);
                position += clip.duration();
                doc
            })
            .collect();

        Self {
            id: track.id,
            name: track.name.clone(),
            kind: track.kind,
            clips,
            is_muted: track.is_muted,
            is_locked: track.is_locked,
            is_visible: track.is_visible,
            volume: track.volume,
        }
    }
}

impl ClipDocument {
    fn new(clip: &Clip, start_time: f64) -> Self {
        let sub_timeline = match &clip.kind {
            ClipKind::Compound(tracks) => Some(tracks.iter().map(TrackDocument::from).collect()),
            _ => None,
        };

        Self {
            id: clip.id,
            source_url: clip.source.clone(),
            source_time_range_start: clip.time_range.start,
            source_time_range_duration: clip.time_range.duration,
            start_time,
            clip_type: clip.clip_type(),
            name: clip.name.clone(),
            volume: clip.volume,
            speed: clip.speed,
            is_muted: clip.is_muted,
            filter: clip.filter.clone(),
            effects: clip.effects.clone(),
            transform: TransformDocument {
                placement: clip.transform,
                opacity: clip.opacity,
            },
            sub_timeline,
        }
    }
}

impl From<&TextOverlay> for TextOverlayDocument {
    fn from(overlay: &TextOverlay) -> Self {
        Self {
            id: overlay.id,
            text: overlay.text.clone(),
            start_time: overlay.time_range.start,
            duration: overlay.time_range.duration,
            position_x: overlay.position_x,
            position_y: overlay.position_y,
            font_name: overlay.font_name.clone(),
            font_size: overlay.font_size,
            color: overlay.color.clone(),
            alignment: overlay.alignment,
        }
    }
}

// ── Document → model ────────────────────────────────────────────

impl TryFrom<ProjectDocument> for Project {
    type Error = MontageError;

    fn try_from(doc: ProjectDocument) -> Result<Self> {
        doc.settings.validate()?;

        Ok(Self {
            id: doc.id,
            name: doc.name,
            settings: doc.settings,
            tracks: doc
                .tracks
                .into_iter()
                .map(Track::try_from)
                .collect::<Result<_>>()?,
            text_overlays: doc.text_overlays.into_iter().map(TextOverlay::from).collect(),
            transitions: doc.transitions,
            global_filter: doc.global_filter,
            created_at: doc.created_at,
            modified_at: doc.modified_at,
            version: doc.version,
        })
    }
}

impl TryFrom<TrackDocument> for Track {
    type Error = MontageError;

    fn try_from(doc: TrackDocument) -> Result<Self> {
        Ok(Self {
            id: doc.id,
            name: doc.name,
            kind: doc.kind,
            clips: doc
                .clips
                .into_iter()
                .map(Clip::try_from)
                .collect::<Result<_>>()?,
            is_muted: doc.is_muted,
            is_locked: doc.is_locked,
            is_visible: doc.is_visible,
            volume: doc.volume,
        })
    }
}

impl TryFrom<ClipDocument> for Clip {
    type Error = MontageError;

    fn try_from(doc: ClipDocument) -> Result<Self> {
        let kind = match (doc.clip_type, doc.sub_timeline) {
            (ClipType::Compound, tracks) => ClipKind::Compound(
                tracks
                    .unwrap_or_default()
                    .into_iter()
                    .map(Track::try_from)
                    .collect::<Result<_>>()?,
            ),
            (other, None) => other.into(),
            (other, Some(_)) => {
                warn!(clip = %doc.id, clip_type = ?other, "Sub-timeline on a non-compound clip");
                return Err(MontageError::UnsupportedFormat);
            }
        };

        Ok(Self {
            id: doc.id,
            name: doc.name,
            kind,
            time_range: TimeRange::new(doc.source_time_range_start, doc.source_time_range_duration),
            source: doc.source_url,
            opacity: doc.transform.opacity,
            volume: doc.volume,
            speed: doc.speed,
            transform: doc.transform.placement,
            effects: doc.effects,
            filter: doc.filter,
            is_muted: doc.is_muted,
        })
    }
}

impl From<TextOverlayDocument> for TextOverlay {
    fn from(doc: TextOverlayDocument) -> Self {
        Self {
            id: doc.id,
            text: doc.text,
            time_range: TimeRange::new(doc.start_time, doc.duration),
            position_x: doc.position_x,
            position_y: doc.position_y,
            font_name: doc.font_name,
            font_size: doc.font_size,
            color: doc.color,
            alignment: doc.alignment,
        }
    }
}

// ── Encodability ────────────────────────────────────────────────

// JSON has no NaN or infinity; serde_json writes them as `null`, which the
// loader rejects. Such projects are refused before anything is written.

fn check_finite(owner: Uuid, field: &str, values: &[f64]) -> Result<()> {
    if values.iter().all(|value| value.is_finite()) {
        return Ok(());
    }
    warn!(%owner, field, "Non-finite value cannot be saved");
    Err(MontageError::UnsupportedFormat)
}

fn check_range(owner: Uuid, field: &str, range: &TimeRange) -> Result<()> {
    check_finite(owner, field, &[range.start, range.duration])
}

fn check_effect(owner: Uuid, field: &str, effect: &Effect) -> Result<()> {
    let values: Vec<f64> = effect.parameters.values().copied().collect();
    check_finite(owner, field, &values)
}

fn check_track(track: &Track) -> Result<()> {
    check_finite(track.id, "volume", &[f64::from(track.volume)])?;
    track.clips.iter().try_for_each(check_clip)
}

fn check_clip(clip: &Clip) -> Result<()> {
    let t = &clip.transform;
    check_range(clip.id, "timeRange", &clip.time_range)?;
    check_finite(
        clip.id,
        "playback",
        &[clip.opacity, f64::from(clip.volume), f64::from(clip.speed)],
    )?;
    check_finite(
        clip.id,
        "transform",
        &[t.position_x, t.position_y, t.scale, t.rotation, t.anchor_x, t.anchor_y],
    )?;
    if let Some(filter) = &clip.filter {
        check_effect(clip.id, "filter", filter)?;
    }
    for effect in &clip.effects {
        check_effect(clip.id, "effects", effect)?;
    }
    if let ClipKind::Compound(tracks) = &clip.kind {
        tracks.iter().try_for_each(check_track)?;
    }
    Ok(())
}

impl Project {
    /// Fail with `UnsupportedFormat` if any numeric field is NaN or infinite.
    fn check_encodable(&self) -> Result<()> {
        self.tracks.iter().try_for_each(check_track)?;
        for overlay in &self.text_overlays {
            check_range(overlay.id, "timeRange", &overlay.time_range)?;
            check_finite(
                overlay.id,
                "layout",
                &[overlay.position_x, overlay.position_y, overlay.font_size],
            )?;
        }
        for transition in &self.transitions {
            check_finite(transition.id, "duration", &[transition.duration])?;
            let values: Vec<f64> = transition.parameters.values().copied().collect();
            check_finite(transition.id, "parameters", &values)?;
        }
        if let Some(filter) = &self.global_filter {
            check_effect(self.id, "globalFilter", filter)?;
        }
        Ok(())
    }
}

// ── Public codec ────────────────────────────────────────────────

impl Project {
    /// Serialize to pretty-printed JSON bytes.
    ///
    /// Fails with `UnsupportedFormat` when a numeric field is NaN or infinite,
    /// since the result could not be loaded back.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        self.check_encodable()?;
        serde_json::to_vec_pretty(&ProjectDocument::from(self)).map_err(|e| {
            warn!(error = %e, "Failed to serialize project");
            MontageError::UnsupportedFormat
        })
    }

    /// Deserialize from JSON bytes.
    ///
    /// Documents written before the `version` field existed load as the
    /// current version; any other version is kept as-is.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let mut raw: serde_json::Value = serde_json::from_slice(data).map_err(|e| {
            warn!(error = %e, "Invalid project JSON");
            MontageError::UnsupportedFormat
        })?;

        if let Some(doc) = raw.as_object_mut() {
            if !doc.contains_key("version") {
                debug!("Project document has no version, assuming {}", CURRENT_VERSION);
                doc.insert("version".into(), CURRENT_VERSION.into());
            }
        }

        let doc: ProjectDocument = serde_json::from_value(raw).map_err(|e| {
            warn!(error = %e, "Project document does not match schema");
            MontageError::UnsupportedFormat
        })?;
        Project::try_from(doc)
    }

    /// Save project to a file path.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let data = self.to_json()?;
        std::fs::write(path, data)?;
        info!(project = %self.id, path = %path.display(), "Saved project");
        Ok(())
    }

    /// Load project from a file path.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let project = Self::from_json(&data)?;
        info!(
            project = %project.id,
            path = %path.display(),
            tracks = project.tracks.len(),
            "Loaded project"
        );
        Ok(project)
    }
}
