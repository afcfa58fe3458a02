//! Montage - project document tool
//!
//! Usage:
//!   montage new <project.json> [name]
//!   montage show <project.json>
//!   montage at <project.json> <seconds>
//!   montage group <project.json> <track-id> <clip-id> <clip-id>...
//!   montage ungroup <project.json> <track-id> <clip-id>
//!   montage split <project.json> <track-id> <clip-id> <offset>

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use montage_timeline::{Clip, Project, Track};
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const USAGE: &str = "usage: montage <new|show|at|group|ungroup|split> <project.json> [args...]";

fn main() -> Result<()> {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (command, rest) = args.split_first().context(USAGE)?;
    let (path, rest) = rest.split_first().context(USAGE)?;
    let path = PathBuf::from(path);

    match command.as_str() {
        "new" => {
            let name = rest.first().map_or("Untitled Project", String::as_str);
            let project = Project::new(name);
            project.save_to_file(&path)?;
            println!("{}", project.id);
        }
        "show" => print_project(&load(&path)?),
        "at" => {
            let time = parse_seconds(rest.first())?;
            let project = load(&path)?;
            for active in project.active_clips_at(time) {
                println!(
                    "track {} {} \"{}\" +{:.3}s (source {:.3}s)",
                    active.track_index,
                    active.clip.id,
                    active.clip.name,
                    active.offset,
                    active.source_time
                );
            }
        }
        "group" => {
            let (track_id, clip_ids) = rest.split_first().context(USAGE)?;
            let track_id = parse_id(track_id)?;
            let ids = clip_ids
                .iter()
                .map(|id| parse_id(id))
                .collect::<Result<HashSet<_>>>()?;

            let mut project = load(&path)?;
            let Some(compound) = project.group_clips(&ids, track_id) else {
                bail!("nothing grouped: need at least two clips of track {track_id}");
            };
            println!("{}", compound.id);
            save(&project, &path)?;
        }
        "ungroup" => {
            let [track_id, clip_id, ..] = rest else {
                bail!(USAGE);
            };
            let (track_id, clip_id) = (parse_id(track_id)?, parse_id(clip_id)?);

            let mut project = load(&path)?;
            let Some(restored) = project.ungroup_compound_clip(clip_id, track_id) else {
                bail!("nothing ungrouped: {clip_id} is not a compound clip on {track_id}");
            };
            for clip in restored {
                println!("{}", clip.id);
            }
            save(&project, &path)?;
        }
        "split" => {
            let [track_id, clip_id, offset, ..] = rest else {
                bail!(USAGE);
            };
            let (track_id, clip_id) = (parse_id(track_id)?, parse_id(clip_id)?);
            let offset = parse_seconds(Some(offset))?;

            let mut project = load(&path)?;
            let Some((first, second)) = project.split_clip(clip_id, offset, track_id) else {
                bail!("nothing split: offset {offset} is outside clip {clip_id}");
            };
            println!("{first}\n{second}");
            save(&project, &path)?;
        }
        other => bail!("unknown command '{other}'\n{USAGE}"),
    }

    Ok(())
}

fn load(path: &Path) -> Result<Project> {
    Project::load_from_file(path).with_context(|| format!("loading {}", path.display()))
}

fn save(project: &Project, path: &Path) -> Result<()> {
    project
        .save_to_file(path)
        .with_context(|| format!("saving {}", path.display()))?;
    info!(path = %path.display(), "Project updated");
    Ok(())
}

fn parse_id(text: &str) -> Result<Uuid> {
    Uuid::parse_str(text).with_context(|| format!("invalid id '{text}'"))
}

fn parse_seconds(text: Option<&String>) -> Result<f64> {
    let text = text.context(USAGE)?;
    text.parse()
        .with_context(|| format!("invalid time '{text}'"))
}

fn print_project(project: &Project) {
    let settings = &project.settings;
    println!("{} ({})", project.name, project.id);
    println!(
        "  {}x{} @ {}, {} Hz, schema v{}",
        settings.width, settings.height, settings.frame_rate, settings.sample_rate, project.version
    );
    println!("  duration {:.3}s", project.total_duration());
    for track in &project.tracks {
        print_track(track, 1);
    }
    for transition in &project.transitions {
        println!(
            "  transition {} {:.3}s",
            transition.kind.label(),
            transition.duration
        );
    }
    for overlay in &project.text_overlays {
        println!("  text \"{}\" at {}", overlay.text, overlay.time_range);
    }
}

fn print_track(track: &Track, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}{:?} track \"{}\" {} ({:.3}s)",
        track.kind,
        track.name,
        track.id,
        track.total_duration()
    );
    let mut position = 0.0;
    for clip in &track.clips {
        print_clip(clip, position, depth + 1);
        position += clip.duration();
    }
}

fn print_clip(clip: &Clip, position: f64, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}{:.3}s {:?} \"{}\" {} source {}",
        position,
        clip.clip_type(),
        clip.name,
        clip.id,
        clip.time_range
    );
    for nested in clip.sub_timeline().unwrap_or_default() {
        print_track(nested, depth + 1);
    }
}
