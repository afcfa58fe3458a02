//! Integration tests for the timeline subsystem.
//!
//! Exercises montage-core value types through the montage-timeline model,
//! its document codec, and the shared-project handle.

use std::collections::HashSet;

use montage_core::{MontageError, TimeRange};
use montage_timeline::{
    commit_trim, Clip, ClipType, Effect, EffectKind, MediaInfo, Project, SharedProject,
    TextOverlay, Track, Transition, TransitionKind,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn clip(name: &str, secs: f64) -> Clip {
    Clip::new(ClipType::Video, TimeRange::new(0.0, secs))
        .with_name(name)
        .with_source(format!("media/{name}.mov"))
}

fn id_set(ids: &[Uuid]) -> HashSet<Uuid> {
    ids.iter().copied().collect()
}

fn build_project() -> Project {
    let mut project = Project::new("Integration Test Project");

    let mut video = Track::new_video("V1");
    video.add_clip(clip("Intro", 5.0));
    video.add_clip(clip("Body", 30.0));
    video.add_clip(clip("Outro", 10.0));
    project.add_track(video);

    let mut music = Track::new_audio("A1");
    music.add_clip(Clip::new(ClipType::Audio, TimeRange::new(0.0, 50.0)).with_name("Music"));
    project.add_track(music);

    project
}

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("montage-{label}-{}.json", Uuid::new_v4()))
}

// ── Project assembly & timing ──────────────────────────────────

#[test]
fn project_duration_is_max_of_tracks() {
    let project = build_project();
    assert_eq!(project.tracks[0].total_duration(), 45.0);
    assert_eq!(project.total_duration(), 50.0);
}

#[test]
fn clip_at_finds_correct_clip() {
    let project = build_project();
    let track = &project.tracks[0];

    assert_eq!(track.clip_at(0.0).unwrap().name, "Intro");
    assert_eq!(track.clip_at(5.0).unwrap().name, "Body");
    assert_eq!(track.clip_at(44.9).unwrap().name, "Outro");
    assert!(track.clip_at(45.0).is_none());
}

#[test]
fn compositor_query_sees_every_visible_track() {
    let project = build_project();
    let active = project.active_clips_at(36.0);
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].clip.name, "Outro");
    assert_eq!(active[0].offset, 1.0);
    assert_eq!(active[1].clip.name, "Music");
}

// ── Structural edits ───────────────────────────────────────────

#[test]
fn group_then_ungroup_round_trips_track() {
    let mut project = build_project();
    let track_id = project.tracks[0].id;
    let original = project.tracks[0].clone();
    let ids = id_set(&[original.clips[0].id, original.clips[1].id]);

    let compound = project.group_clips(&ids, track_id).unwrap();
    assert_eq!(compound.clip_type(), ClipType::Compound);
    assert_eq!(compound.duration(), 35.0);
    let compound_id = compound.id;

    let track = project.track(track_id).unwrap();
    assert_eq!(track.clip_count(), 2);
    assert_eq!(track.total_duration(), 45.0);

    project.ungroup_compound_clip(compound_id, track_id).unwrap();
    assert_eq!(project.track(track_id).unwrap(), &original);
}

#[test]
fn failed_group_leaves_document_identical() {
    let mut project = build_project();
    let track_id = project.tracks[0].id;
    let before = project.to_json().unwrap();

    let single = id_set(&[project.tracks[0].clips[0].id]);
    assert!(project.group_clips(&single, track_id).is_none());

    // Clips from a different track do not count toward the selection.
    let foreign = id_set(&[project.tracks[0].clips[0].id, project.tracks[1].clips[0].id]);
    assert!(project.group_clips(&foreign, track_id).is_none());

    assert_eq!(project.to_json().unwrap(), before);
}

#[test]
fn nested_grouping_builds_two_levels() {
    let mut track = Track::new_video("V1");
    track.add_clip(clip("a", 2.0));
    track.add_clip(clip("b", 3.0));
    track.add_clip(clip("c", 4.0));
    let (a, b, c) = (track.clips[0].id, track.clips[1].id, track.clips[2].id);

    let inner = track.group_clips(&id_set(&[a, b])).unwrap().id;
    let outer = track.group_clips(&id_set(&[inner, c])).unwrap();

    assert_eq!(outer.duration(), 9.0);
    let nested = &outer.sub_timeline().unwrap()[0];
    assert_eq!(nested.clips[0].clip_type(), ClipType::Compound);
    assert_eq!(nested.clips[0].sub_timeline_duration(), 5.0);
}

#[test]
fn split_then_group_restores_duration() {
    let mut project = build_project();
    let track_id = project.tracks[0].id;
    let body = project.tracks[0].clips[1].id;

    let (left, right) = project.split_clip(body, 12.0, track_id).unwrap();
    let track = project.track(track_id).unwrap();
    assert_eq!(track.clip_count(), 4);
    assert_eq!(track.clip_start_time(2), 17.0);

    let compound = project.group_clips(&id_set(&[left, right]), track_id).unwrap();
    assert_eq!(compound.duration(), 30.0);
    assert_eq!(project.total_duration(), 50.0);
}

#[test]
fn validated_trim_uses_resolver() {
    let mut project = build_project();
    let resolver = |source: &str| -> montage_core::Result<MediaInfo> {
        match source {
            "media/Intro.mov" => Ok(MediaInfo {
                duration: 8.0,
                is_playable: true,
            }),
            _ => Err(MontageError::InvalidAsset),
        }
    };

    let intro = &mut project.tracks[0].clips[0];
    assert_eq!(
        commit_trim(intro, TimeRange::new(4.0, 5.0), &resolver),
        Err(MontageError::InvalidTimeRange)
    );
    commit_trim(intro, TimeRange::new(3.0, 5.0), &resolver).unwrap();
    assert_eq!(intro.time_range, TimeRange::new(3.0, 5.0));

    let body = &mut project.tracks[0].clips[1];
    assert_eq!(
        commit_trim(body, TimeRange::new(0.0, 1.0), &resolver),
        Err(MontageError::InvalidAsset)
    );
}

// ── Serialization roundtrip ────────────────────────────────────

fn decorated_project() -> Project {
    let mut project = build_project();
    let track_id = project.tracks[0].id;
    let ids = id_set(&[project.tracks[0].clips[0].id, project.tracks[0].clips[1].id]);
    let compound_id = project.group_clips(&ids, track_id).unwrap().id;
    let outro_id = project.tracks[0].clips[1].id;

    {
        let outro = &mut project.tracks[0].clips[1];
        outro.opacity = 0.8;
        outro.speed = 1.5;
        outro.transform.scale = 0.75;
        outro.transform.flip_vertical = true;
        outro.filter = Some(Effect::new(EffectKind::Temperature).with_param("kelvin", 5200.0));
        outro.add_effect(Effect::new(EffectKind::ChromaKey));
    }

    let mut overlay = Track::new_overlay("Titles");
    overlay.is_locked = true;
    overlay.volume = 0.3;
    overlay.add_clip(Clip::new(ClipType::Image, TimeRange::new(0.0, 3.0)).with_name("Logo"));
    project.add_track(overlay);

    project.add_transition(Transition::between(
        TransitionKind::CrossDissolve,
        0.5,
        compound_id,
        outro_id,
    ));
    project.add_text_overlay(TextOverlay::new("The End", TimeRange::new(40.0, 5.0)));
    project.global_filter = Some(Effect::new(EffectKind::Saturation).with_param("amount", -0.2));
    project
}

#[test]
fn project_survives_serialization_roundtrip() {
    let project = decorated_project();
    let loaded = Project::from_json(&project.to_json().unwrap()).unwrap();
    assert_eq!(loaded, project);
    assert_eq!(loaded.total_duration(), 50.0);
}

#[test]
fn saved_file_reloads_identically() {
    let project = decorated_project();
    let path = temp_path("save");

    project.save_to_file(&path).unwrap();
    let loaded = Project::load_from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, project);
}

#[test]
fn loading_missing_file_is_invalid_asset() {
    let path = temp_path("missing");
    assert_eq!(
        Project::load_from_file(&path),
        Err(MontageError::InvalidAsset)
    );
}

#[test]
fn document_version_is_preserved() {
    let mut project = build_project();
    project.version = 42;

    let mut json: serde_json::Value = serde_json::from_slice(&project.to_json().unwrap()).unwrap();
    assert_eq!(json["version"], 42);
    json["version"] = 3.into();

    let loaded = Project::from_json(&serde_json::to_vec(&json).unwrap()).unwrap();
    assert_eq!(loaded.version, 3);
}

// ── Shared project ─────────────────────────────────────────────

#[test]
fn shared_project_edits_are_visible_to_all_handles() {
    let project = build_project();
    let track_id = project.tracks[0].id;
    let ids = id_set(&[project.tracks[0].clips[1].id, project.tracks[0].clips[2].id]);

    let editor = SharedProject::new(project);
    let autosave = editor.clone();

    editor.group_clips(&ids, track_id).unwrap();

    let saved = Project::from_json(&autosave.to_json().unwrap()).unwrap();
    assert_eq!(saved.tracks[0].clip_count(), 2);
    assert_eq!(saved, autosave.snapshot());
}
