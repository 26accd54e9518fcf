//! Debug dump (F3 by default): write diagnostics, driver state, entity and
//! asset counts and process memory to a timestamped file in `./debug-dumps/`.
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::log::{info, warn};
use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::fs;
use std::time::SystemTime;
use sysinfo::{Pid, PidExt, ProcessExt, System, SystemExt};

use crate::character::DriverSnapshot;
use crate::scene::bevy_host::CharacterDriver;
use crate::settings::Settings;

pub const DUMP_DIR: &str = "debug-dumps";

pub struct DebugDumpPlugin;

impl Plugin for DebugDumpPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_input_system);
    }
}

/// Convert kilobytes to a megabyte string with two decimals.
fn kb_to_mb(kb: u64) -> String {
    format!("{:.2} MB", (kb as f64) / 1024.0)
}

/// Driver section of the dump.
#[must_use]
pub fn driver_section(snapshot: &DriverSnapshot) -> String {
    let mut out = String::new();
    writeln!(out, "Driver:").ok();
    writeln!(out, "  mode={:?} move={:?} facing={:?}", snapshot.mode, snapshot.mv, snapshot.facing).ok();
    writeln!(
        out,
        "  position=({:.3}, {:.3}, {:.3}) heading={:.1}deg",
        snapshot.pose.position.x,
        snapshot.pose.position.y,
        snapshot.pose.position.z,
        snapshot.pose.heading.to_degrees()
    )
    .ok();
    match snapshot.pending {
        Some(t) => writeln!(out, "  pending: {:?} due {:?} then {:?}", t.next, t.due, t.then).ok(),
        None => writeln!(out, "  pending: none").ok(),
    };
    writeln!(
        out,
        "  clock bound={} loading character={} world={}",
        snapshot.clock_bound, snapshot.character_in_flight, snapshot.world_in_flight
    )
    .ok();
    out
}

#[allow(clippy::needless_pass_by_value, clippy::too_many_arguments)]
fn debug_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    diagnostics: Res<DiagnosticsStore>,
    query_entities: Query<Entity>,
    meshes: Res<Assets<Mesh>>,
    clips: Res<Assets<AnimationClip>>,
    scenes: Res<Assets<Scene>>,
    driver: Option<Res<CharacterDriver>>,
) {
    if !keys.just_pressed(settings.key_for("dump_debug", KeyCode::F3)) {
        return;
    }

    let now = SystemTime::now();
    let dt: DateTime<Utc> = DateTime::from(now);
    let ts_secs = dt.timestamp();
    let human_ts = dt.format("%Y-%m-%d %H:%M:%S").to_string();
    let fname = format!("{DUMP_DIR}/debug-{ts_secs}.txt");

    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);
    let frame_time = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FRAME_TIME)
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let mut sys = System::new_all();
    sys.refresh_all();
    let proc = sys.process(Pid::from_u32(std::process::id()));
    let proc_mem_kb = proc.map(|p| p.memory() / 1024).unwrap_or(0);
    let total_mem_kb = sys.total_memory() / 1024;

    let mut out = String::new();
    writeln!(out, "Debug dump: {ts_secs}").ok();
    writeln!(out, "Timestamp: {human_ts}").ok();
    writeln!(out, "FPS: {fps:.1}, frame_time: {frame_time:.4} ms").ok();
    writeln!(out, "Entities: {}", query_entities.iter().count()).ok();
    writeln!(
        out,
        "Assets: meshes={} clips={} scenes={}",
        meshes.len(),
        clips.len(),
        scenes.len()
    )
    .ok();
    writeln!(out, "Process memory: {} (system total {})", kb_to_mb(proc_mem_kb), kb_to_mb(total_mem_kb)).ok();
    match driver {
        Some(d) => out.push_str(&driver_section(&d.snapshot())),
        None => out.push_str("Driver: not started\n"),
    }

    if let Err(e) = fs::create_dir_all(DUMP_DIR).and_then(|()| fs::write(&fname, out)) {
        warn!("could not write debug dump {fname}: {e}");
    } else {
        info!("wrote debug dump {fname}");
    }
}
