use glam::Vec2;
use lane_defence_core::{CellCoord, Resources, Selection, UnitKind};
use lane_defence_engine::{cost, Engine, EngineConfig, EngineError, EngineHost};
use lane_defence_rendering::{Canvas, Color, DisplayRect, Surface, SurfaceError};
use lane_defence_world::query;

#[derive(Debug, Default)]
struct CountingSurface {
    size: Option<Vec2>,
    clears: usize,
    reject: bool,
}

impl Canvas for CountingSurface {
    fn clear(&mut self, _size: Vec2) {
        self.clears += 1;
    }
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {}
    fn fill_triangle(&mut self, _a: Vec2, _b: Vec2, _c: Vec2, _color: Color) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    fn stroke_circle(&mut self, _center: Vec2, _radius: f32, _thickness: f32, _color: Color) {}
}

impl Surface for CountingSurface {
    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        if self.reject {
            return Err(SurfaceError::Unavailable("no context".to_owned()));
        }
        self.size = Some(size);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingHost {
    totals: Vec<Resources>,
    game_overs: usize,
    placements: usize,
    waves: usize,
}

impl EngineHost for RecordingHost {
    fn resources_changed(&mut self, total: Resources) {
        self.totals.push(total);
    }

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

type TestEngine = Engine<CountingSurface, RecordingHost>;

fn identity_display() -> DisplayRect {
    DisplayRect::new(Vec2::ZERO, Vec2::new(720.0, 400.0))
}

fn engine(seed: u64) -> TestEngine {
    Engine::new(
        CountingSurface::default(),
        RecordingHost::default(),
        EngineConfig::new(seed),
    )
    .expect("surface accepts the field size")
}

fn tick_to(engine: &mut TestEngine, frame: u64) {
    while query::frame(engine.world()).get() < frame {
        engine.tick();
    }
}

fn collect_newest_drop(engine: &mut TestEngine) {
    let drops = query::drops(engine.world());
    let drop = drops.last().expect("a drop is on the field");
    engine.pointer_move(drop.center(), identity_display());
    engine.pointer_down();
    engine.tick();
}

#[test]
fn construction_sizes_the_surface() {
    let engine = engine(1);
    assert_eq!(engine.surface().size, Some(Vec2::new(720.0, 400.0)));
    assert!(!engine.is_running());
}

#[test]
fn construction_fails_fast_without_a_drawing_context() {
    let surface = CountingSurface {
        reject: true,
        ..CountingSurface::default()
    };
    let result = Engine::new(surface, RecordingHost::default(), EngineConfig::default());
    assert!(matches!(result, Err(EngineError::Surface(_))));
}

#[test]
fn stopped_engine_ignores_ticks_and_input() {
    let mut engine = engine(2);
    engine.pointer_down();
    engine.tick();

    assert_eq!(query::frame(engine.world()).get(), 0);
    assert_eq!(engine.surface().clears, 0);

    engine.start();
    assert_eq!(engine.host().totals, vec![Resources::ZERO]);
    engine.tick();
    assert_eq!(query::frame(engine.world()).get(), 1);
    assert_eq!(engine.surface().clears, 1, "every tick draws");

    engine.stop();
    engine.tick();
    assert_eq!(query::frame(engine.world()).get(), 1);
}

#[test]
fn start_while_running_does_not_reset() {
    let mut engine = engine(3);
    engine.start();
    tick_to(&mut engine, 10);

    engine.start();
    assert_eq!(query::frame(engine.world()).get(), 10);
    assert_eq!(engine.host().totals.len(), 1);
}

#[test]
fn pointer_is_mapped_through_the_display_scale() {
    let mut engine = engine(4);
    let display = DisplayRect::new(Vec2::new(100.0, 50.0), Vec2::new(360.0, 200.0));

    engine.pointer_move(Vec2::new(280.0, 150.0), display);

    assert_eq!(engine.pointer(), Vec2::new(360.0, 200.0));
}

#[test]
fn collected_drops_fund_a_placement() {
    let mut engine = engine(5);
    engine.start();

    tick_to(&mut engine, 300);
    collect_newest_drop(&mut engine);
    tick_to(&mut engine, 600);
    collect_newest_drop(&mut engine);

    assert_eq!(query::resources(engine.world()), Resources::new(50));
    assert!(query::drops(engine.world()).is_empty());
    assert_eq!(
        engine.host().totals,
        vec![Resources::ZERO, Resources::new(25), Resources::new(50)]
    );

    let selection = Selection::Unit(UnitKind::Producer);
    assert_eq!(cost(selection), Resources::new(50));
    engine.select(Some(selection));
    engine.pointer_move(Vec2::new(40.0, 40.0), identity_display());
    engine.pointer_down();
    engine.tick();

    assert!(query::unit_at(engine.world(), CellCoord::new(0, 0)).is_some());
    assert_eq!(engine.selection(), None, "placement clears the selection");
    assert_eq!(engine.host().placements, 1);
    assert_eq!(query::resources(engine.world()), Resources::ZERO);
}

#[test]
fn unaffordable_placement_is_a_silent_no_op() {
    let mut engine = engine(6);
    engine.start();

    engine.select(Some(Selection::Unit(UnitKind::Wall)));
    engine.pointer_move(Vec2::new(200.0, 200.0), identity_display());
    engine.pointer_down();
    engine.tick();

    assert!(query::units(engine.world()).is_empty());
    assert_eq!(engine.selection(), Some(Selection::Unit(UnitKind::Wall)));
    assert_eq!(engine.host().placements, 0);
}

#[test]
fn undefended_field_ends_in_a_single_game_over() {
    let mut engine = engine(7);
    engine.start();

    let mut ticks = 0;
    while engine.is_running() && ticks < 20_000 {
        engine.tick();
        ticks += 1;
    }

    assert!(!engine.is_running(), "an attacker must eventually break through");
    assert_eq!(engine.host().game_overs, 1);

    let frame = query::frame(engine.world());
    engine.tick();
    assert_eq!(query::frame(engine.world()), frame, "stopped runs stay frozen");
}

#[test]
fn restarting_after_game_over_begins_a_fresh_run() {
    let mut engine = engine(8);
    engine.start();
    while engine.is_running() {
        engine.tick();
    }

    engine.start();

    assert!(engine.is_running());
    assert_eq!(query::frame(engine.world()).get(), 0);
    assert!(query::attackers(engine.world()).is_empty());
    assert_eq!(engine.host().totals.last(), Some(&Resources::ZERO));
}

#[test]
fn same_seed_replays_the_same_run() {
    let mut first = engine(0xabcd);
    let mut second = engine(0xabcd);
    first.start();
    second.start();

    tick_to(&mut first, 3000);
    tick_to(&mut second, 3000);

    assert_eq!(
        query::attackers(first.world()),
        query::attackers(second.world()),
        "replay diverged between runs"
    );
    assert_eq!(query::drops(first.world()), query::drops(second.world()));
}

#[test]
fn wave_arrives_once_through_real_ticks() {
    let mut engine = engine(1);
    engine.start();
    for _ in 0..7199 {
        engine.tick();
    }
    assert!(engine.is_running(), "seed 1 holds out until the wave");
    assert_eq!(query::frame(engine.world()).get(), 7199);
    assert_eq!(engine.host().waves, 0);
    let before = query::attackers(engine.world()).len();

    engine.tick();
    assert_eq!(query::attackers(engine.world()).len(), before + 5);
    assert_eq!(engine.host().waves, 1);

    for _ in 0..600 {
        engine.tick();
    }
    assert_eq!(engine.host().waves, 1);
}
