#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that drives attackers, the one-time wave and
//! sky resource drops from the frame clock.

use lane_defence_core::{
    AttackerKind, Command, Event, Frame, FIELD_HEIGHT, FIELD_WIDTH, FRAMES_PER_SECOND, GRID_ROWS,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Frame on which the one-time wave fires (two minutes of play).
pub const WAVE_FRAME: Frame = Frame::new(7200);
/// Number of attackers spawned back-to-back when the wave fires.
pub const WAVE_SIZE: usize = 5;
/// Frames between sky resource drops.
pub const SKY_DROP_INTERVAL: u64 = 300;

const BASE_CADENCE: u64 = 1200;
const CADENCE_FLOOR: u64 = 180;
const CADENCE_DECAY_PER_SECOND: u64 = 5;
const WAVE_CADENCE_FLOOR: u64 = 90;
const ARMORED_THRESHOLD: f32 = 0.7;
const WAVE_ARMORED_THRESHOLD: f32 = 0.5;
const MIN_SPEED: f32 = 0.10;
const MAX_SPEED: f32 = 0.15;
const SKY_DROP_MARGIN: f32 = 50.0;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration seeding every random draw from `rng_seed`.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Frames between regular spawns at the provided frame.
///
/// The cadence starts at 1200 frames and shrinks by five frames per elapsed
/// second down to a floor of 180. Once the wave is active it is halved, with
/// a floor of 90.
#[must_use]
pub fn cadence(frame: Frame, wave_active: bool) -> u64 {
    let decay = frame.get().saturating_mul(CADENCE_DECAY_PER_SECOND) / FRAMES_PER_SECOND;
    let base = BASE_CADENCE.saturating_sub(decay).max(CADENCE_FLOOR);
    if wave_active {
        (base / 2).max(WAVE_CADENCE_FLOOR)
    } else {
        base
    }
}

/// Pure system that deterministically emits spawn, wave and drop commands.
#[derive(Debug)]
pub struct Spawning {
    rng_seed: u64,
    rng: ChaCha8Rng,
    spawn_timer: u64,
    wave_triggered: bool,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng_seed: config.rng_seed,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            spawn_timer: 0,
            wave_triggered: false,
        }
    }

    /// Rewinds the cadence and reseeds the generator for a fresh run.
    pub fn reset(&mut self) {
        *self = Self::new(Config::new(self.rng_seed));
    }

    /// Consumes frame events and emits the commands due on each frame.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::FrameAdvanced { frame } = event {
                self.on_frame(*frame, out);
            }
        }
    }

    fn on_frame(&mut self, frame: Frame, out: &mut Vec<Command>) {
        if frame >= WAVE_FRAME && !self.wave_triggered {
            self.wave_triggered = true;
            tracing::info!(frame = frame.get(), "wave incoming");
            out.push(Command::BeginWave);
            for _ in 0..WAVE_SIZE {
                out.push(self.next_attacker());
            }
            // The burst stands in for this frame's cadence spawn.
            self.spawn_timer = 0;
        } else {
            self.spawn_timer = self.spawn_timer.saturating_add(1);
            if self.spawn_timer >= cadence(frame, self.wave_triggered) {
                self.spawn_timer = 0;
                out.push(self.next_attacker());
            }
        }

        if frame.get() % SKY_DROP_INTERVAL == 0 {
            out.push(self.next_sky_drop());
        }
    }

    fn next_attacker(&mut self) -> Command {
        let row = self.rng.gen_range(0..GRID_ROWS);
        let threshold = if self.wave_triggered {
            WAVE_ARMORED_THRESHOLD
        } else {
            ARMORED_THRESHOLD
        };
        let kind = if self.rng.gen::<f32>() > threshold {
            AttackerKind::Armored
        } else {
            AttackerKind::Standard
        };
        let speed = self.rng.gen_range(MIN_SPEED..MAX_SPEED);
        tracing::debug!(row, ?kind, speed, "spawning attacker");
        Command::SpawnAttacker { row, kind, speed }
    }

    fn next_sky_drop(&mut self) -> Command {
        let x = self.rng.gen_range(0.0..FIELD_WIDTH - SKY_DROP_MARGIN);
        let resting_y = self
            .rng
            .gen_range(SKY_DROP_MARGIN..FIELD_HEIGHT - SKY_DROP_MARGIN);
        Command::DropResource { x, resting_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_shrinks_with_elapsed_time() {
        assert_eq!(cadence(Frame::new(0), false), 1200);
        assert_eq!(cadence(Frame::new(60), false), 1195);
        assert_eq!(cadence(Frame::new(7140), false), 605);
        assert_eq!(cadence(Frame::new(12_240), false), 180);
        assert_eq!(cadence(Frame::new(100_000), false), 180);
    }

    #[test]
    fn wave_halves_the_cadence() {
        assert_eq!(cadence(Frame::new(7200), true), 300);
        assert_eq!(cadence(Frame::new(12_240), true), 90);
        assert_eq!(cadence(Frame::new(100_000), true), 90);
    }

    #[test]
    fn reset_restores_the_seeded_sequence() {
        let mut spawning = Spawning::new(Config::new(7));
        let first = spawning.next_attacker();
        spawning.wave_triggered = true;
        spawning.spawn_timer = 42;

        spawning.reset();

        assert!(!spawning.wave_triggered);
        assert_eq!(spawning.spawn_timer, 0);
        assert_eq!(spawning.next_attacker(), first);
    }
}
