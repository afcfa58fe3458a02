//! A project shared between call sites, e.g. an editing thread and an
//! autosave task.
//!
//! Every mutation runs under one write lock, so readers see either the state
//! before an edit or the state after it.

use std::collections::HashSet;
use std::sync::Arc;

use montage_core::Result;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::project::Project;

/// Cloneable handle to a single project instance.
#[derive(Debug, Clone, Default)]
pub struct SharedProject {
    inner: Arc<RwLock<Project>>,
}

impl SharedProject {
    pub fn new(project: Project) -> Self {
        Self {
            inner: Arc::new(RwLock::new(project)),
        }
    }

    /// Run a read-only query against the project.
    pub fn read<R>(&self, f: impl FnOnce(&Project) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run a mutation with exclusive access.
    pub fn write<R>(&self, f: impl FnOnce(&mut Project) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Deep copy of the current state.
    pub fn snapshot(&self) -> Project {
        self.inner.read().clone()
    }

    /// Swap in a new project, returning the old one.
    pub fn replace(&self, project: Project) -> Project {
        std::mem::replace(&mut *self.inner.write(), project)
    }

    /// Group clips atomically. Returns the compound clip's ID.
    pub fn group_clips(&self, ids: &HashSet<Uuid>, track_id: Uuid) -> Option<Uuid> {
        self.write(|project| project.group_clips(ids, track_id).map(|clip| clip.id))
    }

    /// Ungroup a compound clip atomically. Returns the restored clip IDs.
    pub fn ungroup_compound_clip(&self, id: Uuid, track_id: Uuid) -> Option<Vec<Uuid>> {
        self.write(|project| {
            project
                .ungroup_compound_clip(id, track_id)
                .map(|clips| clips.iter().map(|clip| clip.id).collect())
        })
    }

    /// Split a clip atomically.
    pub fn split_clip(&self, id: Uuid, offset: f64, track_id: Uuid) -> Option<(Uuid, Uuid)> {
        self.write(|project| project.split_clip(id, offset, track_id))
    }

    /// Serialize a consistent view of the project.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        self.inner.read().to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Clip, ClipType};
    use crate::track::Track;
    use montage_core::TimeRange;

    fn shared_with_clips(count: usize) -> (SharedProject, Uuid, Vec<Uuid>) {
        let mut project = Project::new("Shared");
        let mut track = Track::new_video("V1");
        for _ in 0..count {
            track.add_clip(Clip::new(ClipType::Video, TimeRange::new(0.0, 1.0)));
        }
        let track_id = track.id;
        let ids = track.clips.iter().map(|c| c.id).collect();
        project.add_track(track);
        (SharedProject::new(project), track_id, ids)
    }

    #[test]
    fn test_clones_share_state() {
        let (shared, track_id, ids) = shared_with_clips(3);
        let other = shared.clone();

        let selection: HashSet<Uuid> = ids[..2].iter().copied().collect();
        let compound = shared.group_clips(&selection, track_id).unwrap();

        let count = other.read(|p| p.track(track_id).unwrap().clip_count());
        assert_eq!(count, 2);

        let restored = other.ungroup_compound_clip(compound, track_id).unwrap();
        assert_eq!(restored, ids[..2]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let (shared, track_id, ids) = shared_with_clips(2);
        let snapshot = shared.snapshot();
        shared.split_clip(ids[0], 0.5, track_id).unwrap();

        assert_eq!(snapshot.track(track_id).unwrap().clip_count(), 2);
        assert_eq!(shared.read(|p| p.track(track_id).unwrap().clip_count()), 3);
    }

    #[test]
    fn test_readers_never_see_partial_grouping() {
        let (shared, track_id, ids) = shared_with_clips(4);
        let selection: HashSet<Uuid> = ids.iter().copied().collect();

        std::thread::scope(|scope| {
            let reader = shared.clone();
            scope.spawn(move || {
                for _ in 0..1000 {
                    reader.read(|p| {
                        let track = p.track(track_id).unwrap();
                        assert_eq!(track.total_duration(), 4.0);
                        assert!(track.clip_count() == 4 || track.clip_count() == 1);
                    });
                }
            });

            for _ in 0..100 {
                let compound = shared.group_clips(&selection, track_id).unwrap();
                shared.ungroup_compound_clip(compound, track_id).unwrap();
            }
        });
    }
}
