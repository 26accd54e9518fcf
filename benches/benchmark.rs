use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use bevy::math::Vec3;
use flameboy::assets::{character_path, AssetCatalog, AssetProvider, LoadTicket};
use flameboy::character::{Driver, Move, Mode, RevertDurations, Sector, Tuning};
use flameboy::clock::{AnimationClock, Mixer};
use flameboy::scene::RenderObject;

struct NullMixer(f32);

impl Mixer for NullMixer {
    fn advance(&mut self, seconds: f32) {
        self.0 += seconds;
    }
}

struct NullObject;

impl RenderObject for NullObject {
    type Mixer = NullMixer;

    fn lowest_point(&self) -> f32 {
        0.0
    }

    fn place(&mut self, translation: Vec3, heading: f32) {
        black_box((translation, heading));
    }

    fn play_first_clip(&mut self) -> Option<NullMixer> {
        Some(NullMixer(0.0))
    }
}

struct NullProvider;

impl AssetProvider for NullProvider {
    fn load(&mut self, ticket: LoadTicket, path: &str) {
        black_box((ticket, path));
    }
}

/// Map every tenth of a degree to its sector.
fn bench_sector_mapping(c: &mut Criterion) {
    c.bench_function("sector_from_angle_sweep", |b| {
        b.iter(|| {
            let mut hits = [0u32; 4];
            for tenth in 0..3600u32 {
                let angle = tenth as f32 / 10.0;
                match Sector::from_angle(black_box(angle)) {
                    Some(Sector::Forward) => hits[0] += 1,
                    Some(Sector::Backward) => hits[1] += 1,
                    Some(Sector::StrafeLeft) => hits[2] += 1,
                    Some(Sector::StrafeRight) => hits[3] += 1,
                    None => {}
                }
            }
            black_box(hits);
        })
    });
}

/// Joystick samples sweeping around the circle (deterministic LCG) so every
/// facing change is exercised.
fn bench_directional_input(c: &mut Criterion) {
    c.bench_function("driver_directional_random", |b| {
        b.iter(|| {
            let mut driver: Driver<NullObject> = Driver::new(Tuning::default(), AssetCatalog::default());
            let mut state: u32 = 0x1234_5678;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let angle = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 360.0;
                driver.handle_directional_input(black_box(angle), 1.0);
            }
            black_box(driver.pose());
        })
    });
}

/// Arm and fire many kick and spell chains.
fn bench_transition_chains(c: &mut Criterion) {
    c.bench_function("driver_transition_chains", |b| {
        b.iter(|| {
            let mut driver: Driver<NullObject> = Driver::new(Tuning::default(), AssetCatalog::default());
            let mut provider = NullProvider;
            let mut now = Duration::ZERO;
            for i in 0..500u32 {
                let mv = Move::spell((i % 6) as u8 + 1).unwrap_or(Move::Kick);
                driver.handle_action_input(mv, now, &mut provider);
                now += Duration::from_millis(20_000);
                black_box(driver.advance(now, &mut provider));
            }
            black_box(driver.current_move());
        })
    });
}

fn bench_schedule_lookup(c: &mut Criterion) {
    let durations = RevertDurations::default();
    c.bench_function("schedule_for_all_moves", |b| {
        b.iter(|| {
            for mv in Move::ALL {
                black_box(durations.schedule_for(black_box(mv)));
            }
        })
    });
}

fn bench_character_paths(c: &mut Criterion) {
    c.bench_function("character_path_all", |b| {
        b.iter(|| {
            for mode in [Mode::Base, Mode::Alternate] {
                for mv in Move::ALL {
                    black_box(character_path("flame_boy/", ".glb", mode, mv));
                }
            }
        })
    });
}

fn bench_clock_tick(c: &mut Criterion) {
    c.bench_function("clock_tick_60fps", |b| {
        b.iter(|| {
            let mut clock = AnimationClock::new();
            clock.bind(NullMixer(0.0));
            for frame in 0..1_000u64 {
                clock.tick(black_box(Duration::from_micros(frame * 16_667)));
            }
            black_box(clock.mixer().map(|m| m.0));
        })
    });
}

#[test]
fn __bench_smoke_test() {
    let mut driver: Driver<NullObject> = Driver::new(Tuning::default(), AssetCatalog::default());
    assert_eq!(driver.handle_directional_input(180.0, 1.0), Some(Sector::StrafeLeft));
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(200);
    targets =
        bench_sector_mapping,
        bench_directional_input,
        bench_transition_chains,
        bench_schedule_lookup,
        bench_character_paths,
        bench_clock_tick
}
criterion_main!(benches);
