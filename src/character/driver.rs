//! Movement/animation state driver.
//!
//! Owns mode, move, pose and facing, the single pending auto-revert chain,
//! the active render objects and the animation clock. Every mutation goes
//! through a method here; the Bevy systems in the binary only forward input,
//! time and load results.
//!
//! Two sequencing rules keep late events from stomping newer intent:
//! - every load request carries a [`LoadTicket`]; a result is applied only if
//!   its ticket is the newest one issued for that slot,
//! - arming a transition chain replaces whatever chain was pending.
use std::time::Duration;

use bevy::log::{debug, info, warn};
use bevy::math::Vec3;

use super::facing::{axis_vector, wrap_angle, Facing, Sector};
use super::transition::{PendingTransition, RevertDurations};
use super::{Mode, Move, Pose};
use crate::assets::{AssetCatalog, AssetProvider, AssetSlot, LoadTicket};
use crate::clock::AnimationClock;
use crate::error::AssetError;
use crate::input::InputAction;
use crate::scene::{RenderObject, SceneHost};
use crate::settings::Settings;

/// Numbers the driver needs from settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub durations: RevertDurations,
    /// World units per joystick sample at full force.
    pub speed_scale: f32,
    /// World units per arrow-key press.
    pub keyboard_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            durations: RevertDurations::default(),
            speed_scale: 0.1,
            keyboard_step: 5.0,
        }
    }
}

impl Tuning {
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            durations: settings.animation.durations(),
            speed_scale: settings.movement.speed_scale,
            keyboard_step: settings.movement.keyboard_step,
        }
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The object is now the active one of `slot`.
    Swapped { slot: AssetSlot, missing_clip: bool },
    /// A newer request for the slot exists; the result was dropped.
    Superseded,
    /// The load failed; the previous object and state are untouched.
    Failed(AssetError),
}

#[derive(Debug)]
struct Active<O> {
    object: O,
    ground_offset: f32,
}

#[derive(Debug)]
struct Slot<O> {
    active: Option<Active<O>>,
    latest: Option<u64>,
}

impl<O> Default for Slot<O> {
    fn default() -> Self {
        Self { active: None, latest: None }
    }
}

/// Read-only view used by the HUD and the debug dump.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSnapshot {
    pub mode: Mode,
    pub mv: Move,
    pub facing: Facing,
    pub pose: Pose,
    pub pending: Option<PendingTransition>,
    pub clock_bound: bool,
    pub character_in_flight: bool,
    pub world_in_flight: bool,
}

/// The character state machine.
pub struct Driver<O: RenderObject> {
    mode: Mode,
    mv: Move,
    pose: Pose,
    facing: Facing,
    pending: Option<PendingTransition>,
    next_seq: u64,
    character: Slot<O>,
    world: Slot<O>,
    clock: AnimationClock<O::Mixer>,
    tuning: Tuning,
    catalog: AssetCatalog,
}

impl<O: RenderObject> Driver<O> {
    #[must_use]
    pub fn new(tuning: Tuning, catalog: AssetCatalog) -> Self {
        Self {
            mode: Mode::Base,
            mv: Move::Idle,
            pose: Pose::default(),
            facing: Facing::Front,
            pending: None,
            next_seq: 0,
            character: Slot::default(),
            world: Slot::default(),
            clock: AnimationClock::default(),
            tuning,
            catalog,
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn current_move(&self) -> Move {
        self.mv
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn clock(&self) -> &AnimationClock<O::Mixer> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock<O::Mixer> {
        &mut self.clock
    }

    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[must_use]
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Active object of a slot, if one has been attached.
    #[must_use]
    pub fn active(&self, slot: AssetSlot) -> Option<&O> {
        self.slot(slot).active.as_ref().map(|a| &a.object)
    }

    pub fn active_mut(&mut self, slot: AssetSlot) -> Option<&mut O> {
        self.slot_mut(slot).active.as_mut().map(|a| &mut a.object)
    }

    /// Newest ticket issued for `slot`, if any load was ever requested.
    #[must_use]
    pub fn latest_ticket(&self, slot: AssetSlot) -> Option<LoadTicket> {
        self.slot(slot).latest.map(|seq| LoadTicket { slot, seq })
    }

    /// Takes effect on the next armed chain and the next directional input.
    pub fn set_tuning(&mut self, tuning: Tuning) {
        self.tuning = tuning;
    }

    /// Takes effect on the next load request.
    pub fn set_catalog(&mut self, catalog: AssetCatalog) {
        self.catalog = catalog;
    }

    #[must_use]
    pub fn snapshot(&self) -> DriverSnapshot {
        DriverSnapshot {
            mode: self.mode,
            mv: self.mv,
            facing: self.facing,
            pose: self.pose,
            pending: self.pending,
            clock_bound: self.clock.is_bound(),
            character_in_flight: self.in_flight(AssetSlot::Character),
            world_in_flight: self.in_flight(AssetSlot::World),
        }
    }

    /// Request the initial world and character.
    pub fn start(&mut self, provider: &mut impl AssetProvider) {
        info!("starting: mode={:?} move={:?}", self.mode, self.mv);
        self.request_asset_swap(AssetSlot::World, provider);
        self.request_asset_swap(AssetSlot::Character, provider);
    }

    /// Dispatch a mapped input event.
    pub fn handle_input(
        &mut self,
        input: InputAction,
        now: Duration,
        provider: &mut impl AssetProvider,
    ) {
        match input {
            InputAction::ToggleMode => self.handle_mode_toggle(provider),
            InputAction::Action(mv) => self.handle_action_input(mv, now, provider),
            InputAction::Step(sector) => {
                self.handle_action_input(Move::Run, now, provider);
                let distance = self.tuning.keyboard_step;
                self.step(sector, distance);
            }
        }
    }

    /// Flip between base and alternate mode and reload both assets.
    ///
    /// A pending transition chain keeps running; it will load in the new mode.
    pub fn handle_mode_toggle(&mut self, provider: &mut impl AssetProvider) {
        self.mode = self.mode.toggled();
        info!("mode changed to {:?}", self.mode);
        self.request_asset_swap(AssetSlot::Character, provider);
        self.request_asset_swap(AssetSlot::World, provider);
    }

    /// Switch to `action` and arm its auto-revert chain.
    ///
    /// Any chain already pending is cancelled first, including when `action`
    /// has no chain of its own.
    pub fn handle_action_input(
        &mut self,
        action: Move,
        now: Duration,
        provider: &mut impl AssetProvider,
    ) {
        if let Some(old) = self.pending.take() {
            debug!("cancelled pending transition to {:?} due at {:?}", old.next, old.due);
        }
        self.mv = action;
        self.request_asset_swap(AssetSlot::Character, provider);
        self.pending = self
            .tuning
            .durations
            .schedule_for(action)
            .map(|schedule| schedule.arm(now));
    }

    /// Fire every pending transition whose deadline has passed. Returns how many fired.
    pub fn advance(&mut self, now: Duration, provider: &mut impl AssetProvider) -> usize {
        let mut fired = 0;
        while let Some(pending) = self.pending {
            if pending.due > now {
                break;
            }
            let (next, follow) = pending.fire();
            self.pending = follow;
            self.mv = next;
            debug!("timed transition to {next:?} at {:?}", pending.due);
            self.request_asset_swap(AssetSlot::Character, provider);
            fired += 1;
        }
        fired
    }

    /// Drop the pending chain without firing it.
    pub fn cancel_pending(&mut self) -> Option<PendingTransition> {
        self.pending.take()
    }

    /// Apply one joystick sample. Returns the sector it mapped to.
    ///
    /// Non-finite angles are ignored.
    pub fn handle_directional_input(&mut self, angle_degrees: f32, magnitude: f32) -> Option<Sector> {
        let sector = Sector::from_angle(angle_degrees)?;
        let force = if magnitude.is_finite() { magnitude.clamp(0.0, 1.0) } else { 0.0 };
        let distance = force * self.tuning.speed_scale;
        self.step(sector, distance);
        Some(sector)
    }

    /// Joystick released.
    pub fn handle_directional_end(&mut self) {
        debug!("directional input ended facing {:?}", self.facing);
    }

    fn step(&mut self, sector: Sector, distance: f32) {
        let target = sector.facing();
        if target != self.facing {
            let correction = self.facing.correction_to(target);
            self.pose.heading = wrap_angle(self.pose.heading + correction);
            self.facing = target;
        }
        self.pose.position -= axis_vector(self.pose.heading) * distance;
        self.place_character();
    }

    fn place_character(&mut self) {
        let pose = self.pose;
        if let Some(active) = self.character.active.as_mut() {
            let translation = pose.position + Vec3::Y * active.ground_offset;
            active.object.place(translation, pose.heading);
        }
    }

    fn request_asset_swap(
        &mut self,
        slot: AssetSlot,
        provider: &mut impl AssetProvider,
    ) -> LoadTicket {
        let path = match slot {
            AssetSlot::Character => self.catalog.character_path(self.mode, self.mv),
            AssetSlot::World => self.catalog.world_path(self.mode).to_owned(),
        };
        self.next_seq += 1;
        let ticket = LoadTicket { slot, seq: self.next_seq };
        self.slot_mut(slot).latest = Some(ticket.seq);
        debug!("load #{} {slot:?} <- {path}", ticket.seq);
        provider.load(ticket, &path);
        ticket
    }

    /// Apply the result of a load started by this driver.
    ///
    /// Stale tickets are dropped. On success the previous object of the slot is
    /// removed from `host` and the new one attached; for the character slot the
    /// object is ground-aligned, placed at the pose and the clock is rebound to
    /// its first clip. On failure nothing changes.
    pub fn complete_load<H: SceneHost<O>>(
        &mut self,
        ticket: LoadTicket,
        result: Result<O, AssetError>,
        host: &mut H,
    ) -> LoadOutcome {
        if self.slot(ticket.slot).latest != Some(ticket.seq) {
            debug!("discarding superseded load #{} for {:?}", ticket.seq, ticket.slot);
            return LoadOutcome::Superseded;
        }
        self.slot_mut(ticket.slot).latest = None;
        let mut object = match result {
            Ok(object) => object,
            Err(err) => {
                warn!("{err}");
                return LoadOutcome::Failed(err);
            }
        };

        match ticket.slot {
            AssetSlot::World => {
                if let Some(old) = self.world.active.take() {
                    host.remove_object(old.object);
                }
                object.place(Vec3::ZERO, 0.0);
                host.add_object(&mut object);
                self.world.active = Some(Active { object, ground_offset: 0.0 });
                LoadOutcome::Swapped { slot: AssetSlot::World, missing_clip: false }
            }
            AssetSlot::Character => {
                self.clock.unbind();
                if let Some(old) = self.character.active.take() {
                    host.remove_object(old.object);
                }
                let ground_offset = -object.lowest_point();
                let translation = self.pose.position + Vec3::Y * ground_offset;
                object.place(translation, self.pose.heading);
                host.add_object(&mut object);

                let missing_clip = match object.play_first_clip() {
                    Some(mixer) => {
                        self.clock.bind(mixer);
                        false
                    }
                    None => {
                        warn!("no animation clips for {:?}/{:?}", self.mode, self.mv);
                        true
                    }
                };
                self.character.active = Some(Active { object, ground_offset });
                LoadOutcome::Swapped { slot: AssetSlot::Character, missing_clip }
            }
        }
    }

    fn in_flight(&self, slot: AssetSlot) -> bool {
        self.slot(slot).latest.is_some()
    }

    fn slot(&self, slot: AssetSlot) -> &Slot<O> {
        match slot {
            AssetSlot::Character => &self.character,
            AssetSlot::World => &self.world,
        }
    }

    fn slot_mut(&mut self, slot: AssetSlot) -> &mut Slot<O> {
        match slot {
            AssetSlot::Character => &mut self.character,
            AssetSlot::World => &mut self.world,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Mixer;

    #[derive(Debug)]
    struct TestMixer {
        id: u32,
        seconds: f32,
    }

    impl Mixer for TestMixer {
        fn advance(&mut self, seconds: f32) {
            self.seconds += seconds;
        }
    }

    #[derive(Debug)]
    struct TestObject {
        id: u32,
        lowest: f32,
        has_clip: bool,
        placed: Option<(Vec3, f32)>,
    }

    impl TestObject {
        fn new(id: u32) -> Self {
            Self { id, lowest: 0.0, has_clip: true, placed: None }
        }
    }

    impl RenderObject for TestObject {
        type Mixer = TestMixer;

        fn lowest_point(&self) -> f32 {
            self.lowest
        }

        fn place(&mut self, translation: Vec3, heading: f32) {
            self.placed = Some((translation, heading));
        }

        fn play_first_clip(&mut self) -> Option<TestMixer> {
            self.has_clip.then_some(TestMixer { id: self.id, seconds: 0.0 })
        }
    }

    #[derive(Default)]
    struct RecordingProvider {
        requests: Vec<(LoadTicket, String)>,
    }

    impl AssetProvider for RecordingProvider {
        fn load(&mut self, ticket: LoadTicket, path: &str) {
            self.requests.push((ticket, path.to_string()));
        }
    }

    impl RecordingProvider {
        fn last(&self, slot: AssetSlot) -> (LoadTicket, String) {
            self.requests
                .iter()
                .rev()
                .find(|(t, _)| t.slot == slot)
                .cloned()
                .expect("a request for the slot")
        }
    }

    #[derive(Default)]
    struct RecordingHost {
        attached: Vec<u32>,
        removed: Vec<u32>,
    }

    impl SceneHost<TestObject> for RecordingHost {
        fn add_object(&mut self, object: &mut TestObject) {
            self.attached.push(object.id);
        }

        fn remove_object(&mut self, object: TestObject) {
            self.attached.retain(|id| *id != object.id);
            self.removed.push(object.id);
        }
    }

    fn driver() -> Driver<TestObject> {
        Driver::new(Tuning::default(), AssetCatalog::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn attach_character(
        d: &mut Driver<TestObject>,
        provider: &RecordingProvider,
        host: &mut RecordingHost,
        object: TestObject,
    ) -> LoadOutcome {
        let (ticket, _) = provider.last(AssetSlot::Character);
        d.complete_load(ticket, Ok(object), host)
    }

    #[test]
    fn start_requests_world_then_character() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.start(&mut p);
        let paths: Vec<_> = p.requests.iter().map(|(t, path)| (t.slot, path.as_str())).collect();
        assert_eq!(
            paths,
            vec![
                (AssetSlot::World, "field.glb"),
                (AssetSlot::Character, "flame_boy/base/idle.glb"),
            ]
        );
    }

    #[test]
    fn mode_toggle_alternates_and_reloads_both_slots() {
        let mut d = driver();
        let mut p = RecordingProvider::default();

        d.handle_mode_toggle(&mut p);
        assert_eq!(d.mode(), Mode::Alternate);
        assert_eq!(p.last(AssetSlot::Character).1, "flame_boy/rage/idle.glb");
        assert_eq!(p.requests.len(), 2);

        d.handle_mode_toggle(&mut p);
        assert_eq!(d.mode(), Mode::Base);
        assert_eq!(p.last(AssetSlot::Character).1, "flame_boy/base/idle.glb");
        assert_eq!(p.requests.len(), 4);
    }

    #[test]
    fn mode_toggle_keeps_pending_chain() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        d.handle_mode_toggle(&mut p);
        assert_eq!(d.pending().map(|t| t.next), Some(Move::FightIdle));

        d.advance(ms(1000), &mut p);
        assert_eq!(p.last(AssetSlot::Character).1, "flame_boy/rage/fight_idle.glb");
    }

    #[test]
    fn kick_reverts_to_fight_idle_then_idle() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        assert_eq!(d.current_move(), Move::Kick);
        assert_eq!(p.last(AssetSlot::Character).1, "flame_boy/base/kick.glb");

        assert_eq!(d.advance(ms(999), &mut p), 0);
        assert_eq!(d.current_move(), Move::Kick);

        assert_eq!(d.advance(ms(1000), &mut p), 1);
        assert_eq!(d.current_move(), Move::FightIdle);
        assert_eq!(d.pending().map(|t| t.due), Some(ms(11_000)));

        assert_eq!(d.advance(ms(10_999), &mut p), 0);
        assert_eq!(d.advance(ms(11_000), &mut p), 1);
        assert_eq!(d.current_move(), Move::Idle);
        assert!(d.pending().is_none());
        assert_eq!(p.last(AssetSlot::Character).1, "flame_boy/base/idle.glb");
    }

    #[test]
    fn new_action_cancels_previous_chain() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        d.handle_action_input(Move::Spell1, ms(500), &mut p);

        assert_eq!(d.advance(ms(1000), &mut p), 0);
        assert_eq!(d.current_move(), Move::Spell1);

        assert_eq!(d.advance(ms(6999), &mut p), 0);
        assert_eq!(d.advance(ms(7000), &mut p), 1);
        assert_eq!(d.current_move(), Move::FightIdle);

        assert_eq!(d.advance(ms(16_999), &mut p), 0);
        assert_eq!(d.advance(ms(17_000), &mut p), 1);
        assert_eq!(d.current_move(), Move::Idle);
    }

    #[test]
    fn action_without_chain_still_cancels() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        d.handle_action_input(Move::Idle, ms(100), &mut p);
        assert!(d.pending().is_none());
        assert_eq!(d.advance(ms(60_000), &mut p), 0);
        assert_eq!(d.current_move(), Move::Idle);
    }

    #[test]
    fn overdue_chain_fires_every_stage_in_one_advance() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        assert_eq!(d.advance(ms(20_000), &mut p), 2);
        assert_eq!(d.current_move(), Move::Idle);
    }

    #[test]
    fn arrow_step_runs_and_moves_one_keyboard_step() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        d.handle_input(InputAction::Step(Sector::Forward), ms(0), &mut p);
        assert_eq!(d.current_move(), Move::Run);
        assert_eq!(d.pending().map(|t| (t.next, t.due)), Some((Move::Idle, ms(500))));
        assert!((d.pose().position.z + 5.0).abs() < 1e-5);
    }

    #[test]
    fn exactly_one_character_after_repeated_swaps() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.start(&mut p);
        let (world, _) = p.last(AssetSlot::World);
        d.complete_load(world, Ok(TestObject::new(100)), &mut host);
        attach_character(&mut d, &p, &mut host, TestObject::new(1));

        d.handle_action_input(Move::Kick, ms(0), &mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(2));
        d.advance(ms(1000), &mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(3));

        assert_eq!(host.attached, vec![100, 3]);
        assert_eq!(host.removed, vec![1, 2]);
        assert_eq!(d.active(AssetSlot::Character).map(|o| o.id), Some(3));
    }

    #[test]
    fn failed_load_keeps_previous_object_and_state() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.start(&mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(1));

        d.handle_action_input(Move::Kick, ms(0), &mut p);
        let before = d.snapshot();
        let (ticket, path) = p.last(AssetSlot::Character);
        let err = AssetError::LoadFailed { path, reason: "missing".into() };
        let outcome = d.complete_load(ticket, Err(err.clone()), &mut host);

        assert_eq!(outcome, LoadOutcome::Failed(err));
        assert_eq!(d.active(AssetSlot::Character).map(|o| o.id), Some(1));
        assert_eq!(host.attached, vec![1]);
        assert!(d.clock().is_bound());
        let after = d.snapshot();
        assert_eq!(after.mv, before.mv);
        assert_eq!(after.pending, before.pending);
        assert!(!after.character_in_flight);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.handle_action_input(Move::Kick, ms(0), &mut p);
        let (stale, _) = p.last(AssetSlot::Character);
        d.handle_action_input(Move::Spell2, ms(10), &mut p);
        let (fresh, _) = p.last(AssetSlot::Character);

        assert_eq!(d.complete_load(stale, Ok(TestObject::new(1)), &mut host), LoadOutcome::Superseded);
        assert!(host.attached.is_empty());
        assert_eq!(
            d.complete_load(fresh, Ok(TestObject::new(2)), &mut host),
            LoadOutcome::Swapped { slot: AssetSlot::Character, missing_clip: false }
        );
        assert_eq!(host.attached, vec![2]);

        // Completing the same ticket twice is also stale.
        assert_eq!(d.complete_load(fresh, Ok(TestObject::new(3)), &mut host), LoadOutcome::Superseded);
    }

    #[test]
    fn character_is_ground_aligned_at_pose() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.handle_directional_input(90.0, 1.0);
        d.start(&mut p);
        let mut object = TestObject::new(1);
        object.lowest = -1.2;
        attach_character(&mut d, &p, &mut host, object);

        let (translation, heading) = d
            .active(AssetSlot::Character)
            .and_then(|o| o.placed)
            .expect("placed");
        assert!((translation.y - 1.2).abs() < 1e-5);
        assert!((translation.z + 0.1).abs() < 1e-5);
        assert_eq!(heading, 0.0);
    }

    #[test]
    fn directional_turn_is_applied_once() {
        let mut d = driver();
        assert_eq!(d.handle_directional_input(90.0, 1.0), Some(Sector::Forward));
        assert_eq!(d.facing(), Facing::Front);
        assert_eq!(d.pose().heading, 0.0);

        assert_eq!(d.handle_directional_input(0.0, 1.0), Some(Sector::StrafeRight));
        assert_eq!(d.facing(), Facing::Right);
        let heading = d.pose().heading;
        assert!((heading + std::f32::consts::FRAC_PI_2).abs() < 1e-5);

        d.handle_directional_input(0.0, 1.0);
        assert!((d.pose().heading - heading).abs() < 1e-6);
        // Facing -90° moves along +x.
        assert!((d.pose().position.x - 0.2).abs() < 1e-5);
    }

    #[test]
    fn non_finite_joystick_input_is_ignored() {
        let mut d = driver();
        assert_eq!(d.handle_directional_input(f32::NAN, 1.0), None);
        assert_eq!(d.pose(), Pose::default());
        assert_eq!(d.handle_directional_input(45.0, f32::INFINITY), Some(Sector::StrafeRight));
        assert_eq!(d.pose().position, Vec3::ZERO);
    }

    #[test]
    fn missing_clip_leaves_clock_unbound() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.start(&mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(1));
        assert!(d.clock().is_bound());

        d.handle_action_input(Move::Spell3, ms(0), &mut p);
        let mut clipless = TestObject::new(2);
        clipless.has_clip = false;
        assert_eq!(
            attach_character(&mut d, &p, &mut host, clipless),
            LoadOutcome::Swapped { slot: AssetSlot::Character, missing_clip: true }
        );
        assert!(!d.clock().is_bound());
        assert_eq!(d.clock_mut().tick(ms(100)), 0.0);
    }

    #[test]
    fn clock_only_advances_the_newest_mixer() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.start(&mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(1));
        d.clock_mut().tick(ms(0));
        d.clock_mut().tick(ms(1000));
        assert_eq!(d.clock().mixer().map(|m| (m.id, m.seconds)), Some((1, 1.0)));

        d.handle_action_input(Move::Kick, ms(1000), &mut p);
        attach_character(&mut d, &p, &mut host, TestObject::new(2));
        d.clock_mut().tick(ms(1500));
        assert_eq!(d.clock().mixer().map(|m| (m.id, m.seconds)), Some((2, 0.5)));
    }

    #[test]
    fn world_is_placed_at_origin_and_never_bound() {
        let mut d = driver();
        let mut p = RecordingProvider::default();
        let mut host = RecordingHost::default();
        d.handle_directional_input(90.0, 1.0);
        d.start(&mut p);
        let (world, _) = p.last(AssetSlot::World);
        d.complete_load(world, Ok(TestObject::new(100)), &mut host);

        assert_eq!(d.active(AssetSlot::World).and_then(|o| o.placed), Some((Vec3::ZERO, 0.0)));
        assert!(!d.clock().is_bound());
    }
}
