//! Systems that connect the driver to Bevy.
//!
//! They run chained in `Update` while playing: input first, then timed
//! transitions, then load completion, then the clock and the transforms. The
//! clock is ticked after any swap of the same frame, so a frame never
//! advances the mixer of a character that was just replaced.
use bevy::hierarchy::HierarchyQueryExt;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use flameboy::assets::gltf::{GltfAssets, GltfProvider};
use flameboy::assets::AssetSlot;
use flameboy::character::{LoadOutcome, Pose};
use flameboy::scene::bevy_host::{BevySceneHost, CharacterDriver, CharacterModel};
use flameboy::ui::Notices;

use crate::MainCamera;

const CAMERA_OFFSET: Vec3 = Vec3::new(1.6, 1.8, 3.0);
const CAMERA_LOOK_HEIGHT: f32 = 1.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ORBIT_PITCH_LIMIT: f32 = 1.4;
const ZOOM_STEP: f32 = 0.5;
const ZOOM_RANGE: (f32, f32) = (1.5, 30.0);

/// Camera position around the character, in spherical coordinates.
///
/// Yaw 0 puts the camera on +Z of the target. Positive pitch is above it.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraOrbit {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for CameraOrbit {
    fn default() -> Self {
        Self::from_offset(CAMERA_OFFSET)
    }
}

impl CameraOrbit {
    fn from_offset(offset: Vec3) -> Self {
        let distance = offset.length();
        Self {
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).asin(),
            distance,
        }
    }

    #[must_use]
    pub fn offset(&self) -> Vec3 {
        let flat = self.distance * self.pitch.cos();
        Vec3::new(flat * self.yaw.sin(), self.distance * self.pitch.sin(), flat * self.yaw.cos())
    }

    /// Drag by a mouse delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Move closer for positive `lines`, farther for negative.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance - lines * ZOOM_STEP).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1);
    }
}

/// Issue the initial world and character loads when the game starts.
pub fn start_driver(mut driver: ResMut<CharacterDriver>, mut provider: ResMut<GltfProvider>) {
    driver.start(&mut *provider);
}

/// Fire due auto-revert transitions.
#[allow(clippy::needless_pass_by_value)]
pub fn advance_transitions(
    time: Res<Time>,
    mut driver: ResMut<CharacterDriver>,
    mut provider: ResMut<GltfProvider>,
) {
    driver.advance(time.elapsed(), &mut *provider);
}

/// Start queued loads and hand finished ones to the driver.
pub fn poll_loads(
    mut commands: Commands,
    mut provider: ResMut<GltfProvider>,
    mut assets: GltfAssets,
    mut driver: ResMut<CharacterDriver>,
    mut notices: ResMut<Notices>,
) {
    provider.start_queued(&assets.server);
    if provider.is_idle() {
        return;
    }
    let finished = provider.poll(&mut assets);
    let mut host = BevySceneHost { commands: &mut commands };
    for (ticket, result) in finished {
        match driver.complete_load(ticket, result, &mut host) {
            LoadOutcome::Failed(err) => {
                notices.push(format!(
                    "Failed to load the model. Please try again later. ({})",
                    err.path()
                ));
            }
            LoadOutcome::Swapped { slot, missing_clip } => {
                debug!("swapped {slot:?} (missing clip: {missing_clip})");
            }
            LoadOutcome::Superseded => {}
        }
    }
}

/// Advance the bound mixer by this frame's wall-clock delta.
#[allow(clippy::needless_pass_by_value)]
pub fn tick_animation_clock(time: Res<Time>, mut driver: ResMut<CharacterDriver>) {
    driver.clock_mut().tick(time.elapsed());
}

/// Seek the character's animation players to the clock's playback position.
#[allow(clippy::needless_pass_by_value)]
pub fn apply_clip_playback(
    mut commands: Commands,
    driver: Res<CharacterDriver>,
    children: Query<&Children>,
    mut players: Query<(&mut AnimationPlayer, Option<&Handle<AnimationGraph>>)>,
) {
    let Some(root) = driver.active(AssetSlot::Character).and_then(|o| o.entity) else {
        return;
    };
    let Some(mixer) = driver.clock().mixer() else { return };
    let binding = &mixer.binding;

    for entity in children.iter_descendants(root) {
        let Ok((mut player, graph)) = players.get_mut(entity) else { continue };
        if graph != Some(&binding.graph) {
            commands.entity(entity).insert(binding.graph.clone());
        }
        if !player.is_playing_animation(binding.node) {
            player.stop_all();
            player.play(binding.node).repeat();
        }
        if let Some(active) = player.animation_mut(binding.node) {
            active.set_speed(0.0).seek_to(mixer.seconds);
        }
    }
}

/// Copy the driver's placement of the character onto its entity.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_character_transform(
    driver: Res<CharacterDriver>,
    mut transforms: Query<&mut Transform, With<CharacterModel>>,
) {
    let Some(object) = driver.active(AssetSlot::Character) else { return };
    let Some(entity) = object.entity else { return };
    if let Ok(mut t) = transforms.get_mut(entity) {
        if *t != object.transform {
            *t = object.transform;
        }
    }
}

/// Orbit with a left or right mouse drag, zoom with the wheel.
#[allow(clippy::needless_pass_by_value)]
pub fn orbit_camera(
    buttons: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    mut orbit: ResMut<CameraOrbit>,
) {
    let dragging = buttons.any_pressed([MouseButton::Left, MouseButton::Right]);
    let delta: Vec2 = motion.read().map(|m| m.delta).sum();
    if dragging && delta != Vec2::ZERO {
        orbit.rotate(delta);
    }
    for ev in wheel.read() {
        let lines = match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / 100.0,
        };
        orbit.zoom(lines);
    }
}

/// Keep the camera on its orbit around the character pose.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_camera(
    driver: Res<CharacterDriver>,
    orbit: Res<CameraOrbit>,
    mut cameras: Query<&mut Transform, (With<MainCamera>, Without<CharacterModel>)>,
) {
    let Pose { position, .. } = driver.pose();
    let target = position + Vec3::Y * CAMERA_LOOK_HEIGHT;
    let eye = position + orbit.offset();
    for mut t in &mut cameras {
        *t = Transform::from_translation(eye).looking_at(target, Vec3::Y);
    }
}
