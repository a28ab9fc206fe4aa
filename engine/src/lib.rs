#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game engine that owns a Lane Defence run and drives it one tick at a time.
//!
//! The engine wires the authoritative world to the spawning and interaction
//! systems, serializes host input through a queue drained at the start of
//! each tick, reports coarse state changes to an [`EngineHost`], and draws
//! every tick onto a host-provided [`Surface`].

mod scene;
mod schedule;

use std::collections::VecDeque;

use glam::Vec2;
use lane_defence_core::{Command, Event, Resources, Selection, FIELD_HEIGHT, FIELD_WIDTH};
use lane_defence_rendering::{draw_scene, DisplayRect, Surface, SurfaceError};
use lane_defence_system_interaction::{Interaction, PointerPress};
use lane_defence_system_spawning::{self as spawning, Spawning};
use lane_defence_world::{self as world, query, World};
use thiserror::Error;

pub use schedule::{TickScheduler, TICKS_PER_SECOND};

/// Seed used when the host does not provide one.
pub const DEFAULT_SEED: u64 = 0x6c61_6e65_6465_6665;

/// Notifications the engine raises toward the hosting UI.
pub trait EngineHost {
    /// The spendable resource total changed, including the reset to zero.
    fn resources_changed(&mut self, total: Resources);

    /// An attacker crossed the near edge; the run is over.
    fn game_over(&mut self);

    /// A placement or removal succeeded and the selection was cleared.
    fn placement_completed(&mut self);

    /// The one-time wave started.
    fn wave_started(&mut self);
}

/// Configuration parameters required to construct an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    seed: u64,
}

impl EngineConfig {
    /// Creates a configuration seeding every random draw from `seed`.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed feeding the attacker and drop generator.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Errors raised while constructing an engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The host surface could not be sized for the field.
    #[error("failed to prepare the drawing surface")]
    Surface(#[from] SurfaceError),
}

/// Resources required to use a selection.
#[must_use]
pub fn cost(selection: Selection) -> Resources {
    selection.cost()
}

#[derive(Clone, Copy, Debug)]
enum Input {
    Select(Option<Selection>),
    Press(Vec2),
}

/// Owns a run and advances it on every [`Engine::tick`].
#[derive(Debug)]
pub struct Engine<S, H> {
    surface: S,
    host: H,
    world: World,
    spawning: Spawning,
    interaction: Interaction,
    selection: Option<Selection>,
    pointer: Vec2,
    pending: VecDeque<Input>,
    running: bool,
}

impl<S, H> Engine<S, H>
where
    S: Surface,
    H: EngineHost,
{
    /// Creates a stopped engine, sizing `surface` to the field.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] when the surface cannot provide a
    /// drawing context of the field's size.
    pub fn new(mut surface: S, host: H, config: EngineConfig) -> Result<Self, EngineError> {
        surface.resize(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT))?;
        tracing::debug!(seed = config.seed(), "engine created");

        Ok(Self {
            surface,
            host,
            world: World::new(),
            spawning: Spawning::new(spawning::Config::new(config.seed())),
            interaction: Interaction::new(),
            selection: None,
            pointer: Vec2::ZERO,
            pending: VecDeque::new(),
            running: false,
        })
    }

    /// Resets the run and begins ticking. Has no effect while already running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }

        self.pending.clear();
        self.selection = None;
        self.spawning.reset();
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::ResetRun, &mut events);
        self.running = true;
        self.dispatch(events);
        tracing::info!("run started");
    }

    /// Stops ticking. Input is ignored until the next [`Engine::start`].
    pub fn stop(&mut self) {
        if self.running {
            tracing::info!(frame = query::frame(&self.world).get(), "run stopped");
        }
        self.running = false;
    }

    /// Reports whether the engine is currently ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Queues a change of the pending action; `None` clears it.
    pub fn select(&mut self, selection: Option<Selection>) {
        if self.running {
            self.pending.push_back(Input::Select(selection));
        }
    }

    /// Tracks the pointer, mapping the screen position into field coordinates.
    pub fn pointer_move(&mut self, screen: Vec2, display: DisplayRect) {
        self.pointer = display.to_field(screen, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
    }

    /// Queues a press at the last tracked pointer position.
    pub fn pointer_down(&mut self) {
        if self.running {
            self.pending.push_back(Input::Press(self.pointer));
        }
    }

    /// Runs one simulation step followed by a draw. Does nothing while stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        self.advance();
        self.render();
    }

    /// Runs one simulation step without drawing. Does nothing while stopped.
    pub fn advance(&mut self) {
        if !self.running {
            return;
        }

        while let Some(input) = self.pending.pop_front() {
            self.handle_input(input);
        }

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::AdvanceFrame, &mut events);

        let mut commands = Vec::new();
        self.spawning.handle(&events, &mut commands);
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        world::apply(&mut self.world, Command::ResolveFrame, &mut events);
        tracing::trace!(
            frame = query::frame(&self.world).get(),
            attackers = query::attackers(&self.world).len(),
            projectiles = query::projectiles(&self.world).len(),
            drops = query::drops(&self.world).len(),
            "frame resolved"
        );
        self.dispatch(events);
    }

    /// Draws the current state of the run onto the surface.
    pub fn render(&mut self) {
        let scene = scene::describe(&self.world, self.selection, self.pointer);
        draw_scene(&scene, &mut self.surface);
    }

    /// Authoritative world of the current run.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Host receiving the engine's notifications.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Surface the engine draws onto.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Currently active selection.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Last tracked pointer position in field coordinates.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    fn handle_input(&mut self, input: Input) {
        match input {
            Input::Select(selection) => self.selection = selection,
            Input::Press(at) => {
                let drops = query::drops(&self.world);
                let mut commands = Vec::new();
                let world = &self.world;
                self.interaction.handle(
                    PointerPress::new(at, self.selection),
                    &drops,
                    |cell| query::unit_at(world, cell).is_some(),
                    &mut commands,
                );

                let mut events = Vec::new();
                for command in commands {
                    world::apply(&mut self.world, command, &mut events);
                }
                self.dispatch(events);
            }
        }
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::ResourcesChanged { total } => self.host.resources_changed(total),
                Event::WaveStarted { frame } => {
                    tracing::info!(frame = frame.get(), "wave started");
                    self.host.wave_started();
                }
                Event::UnitPlaced { kind, cell } => {
                    tracing::debug!(?kind, ?cell, "unit placed");
                    self.selection = None;
                    self.host.placement_completed();
                }
                Event::UnitRemoved { kind, cell } => {
                    tracing::debug!(?kind, ?cell, "unit removed");
                    self.selection = None;
                    self.host.placement_completed();
                }
                Event::AttackerBreached { row, frame } => {
                    if self.running {
                        tracing::warn!(row, frame = frame.get(), "attacker breached the field");
                        self.running = false;
                        self.host.game_over();
                    }
                }
                Event::ResourceCollected { drop, value } => {
                    tracing::debug!(drop = drop.get(), value = value.get(), "resource collected");
                }
                Event::AttackerConsumed { consumer } => {
                    tracing::debug!(?consumer, "attacker consumed");
                }
                other => tracing::trace!(event = ?other, "world event"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{CellCoord, Frame, UnitKind};
    use lane_defence_rendering::{Canvas, Color};

    #[derive(Debug, Default)]
    struct NullSurface;

    impl Canvas for NullSurface {
        fn clear(&mut self, _size: Vec2) {}
        fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {}
        fn fill_triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _color: Color) {}
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
        fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _thickness: f32, _color: Color) {}
    }

    impl Surface for NullSurface {
        fn resize(&mut self, _size: Vec2) -> Result<(), SurfaceError> {
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct Tally {
        waves: usize,
        game_overs: usize,
        placements: usize,
    }

    impl EngineHost for Tally {
        fn resources_changed(&mut self, _total: Resources) {}
        fn game_over(&mut self) {
            self.game_overs += 1;
        }
        fn placement_completed(&mut self) {
            self.placements += 1;
        }
        fn wave_started(&mut self) {
            self.waves += 1;
        }
    }

    fn running_engine() -> Engine<NullSurface, Tally> {
        let mut engine = Engine::new(NullSurface, Tally::default(), EngineConfig::default())
            .expect("null surface always resizes");
        engine.start();
        engine
    }

    #[test]
    fn wave_event_notifies_the_host() {
        let mut engine = running_engine();
        engine.dispatch(vec![Event::WaveStarted {
            frame: Frame::new(7200),
        }]);
        assert_eq!(engine.host().waves, 1);
    }

    #[test]
    fn repeated_breaches_end_the_run_once() {
        let mut engine = running_engine();
        let breach = Event::AttackerBreached {
            row: 0,
            frame: Frame::new(10),
        };
        engine.dispatch(vec![breach.clone(), breach]);

        assert_eq!(engine.host().game_overs, 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn removal_clears_the_selection() {
        let mut engine = running_engine();
        engine.selection = Some(Selection::RemovalTool);
        engine.dispatch(vec![Event::UnitRemoved {
            kind: UnitKind::Wall,
            cell: CellCoord::new(1, 1),
        }]);

        assert_eq!(engine.selection(), None);
        assert_eq!(engine.host().placements, 1);
    }
}
