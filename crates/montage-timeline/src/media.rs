//! Trim validation against real media.
//!
//! The timeline never opens media itself. Callers that want to reject trim
//! windows running past the end of a file supply a [`MediaResolver`] backed by
//! whatever decoder they use.

use montage_core::{MontageError, Result, TimeRange};
use tracing::debug;

use crate::clip::Clip;

/// What a resolver knows about a media source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaInfo {
    /// Real duration of the media in seconds
    pub duration: f64,
    pub is_playable: bool,
}

/// Looks up media by source locator.
pub trait MediaResolver {
    /// Resolve a source locator. Missing media is `InvalidAsset`.
    fn resolve(&self, source: &str) -> Result<MediaInfo>;
}

impl<F> MediaResolver for F
where
    F: Fn(&str) -> Result<MediaInfo>,
{
    fn resolve(&self, source: &str) -> Result<MediaInfo> {
        self(source)
    }
}

/// Check that `range` is a valid trim window for `clip`'s media.
pub fn validate_trim(clip: &Clip, range: TimeRange, resolver: &dyn MediaResolver) -> Result<()> {
    let source = clip.source.as_deref().ok_or(MontageError::InvalidAsset)?;
    let info = resolver.resolve(source)?;

    if !info.is_playable {
        return Err(MontageError::UnsupportedFormat);
    }

    let finite = range.start.is_finite() && range.duration.is_finite();
    if !finite || range.start < 0.0 || range.duration < 0.0 || range.end() > info.duration {
        debug!(
            clip = %clip.id,
            start = range.start,
            duration = range.duration,
            media_duration = info.duration,
            "Rejected trim window"
        );
        return Err(MontageError::InvalidTimeRange);
    }
    Ok(())
}

/// Validate a trim window and apply it. On error the clip is unchanged.
pub fn commit_trim(clip: &mut Clip, range: TimeRange, resolver: &dyn MediaResolver) -> Result<()> {
    validate_trim(clip, range, resolver)?;
    clip.trim(range.start, range.duration);
    Ok(())
}
