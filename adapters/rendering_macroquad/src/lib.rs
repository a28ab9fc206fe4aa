#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed window adapter for Lane Defence.
//!
//! Macroquad is pulled in without its default `audio` feature; the game is
//! silent.
//!
//! The adapter owns the window loop: it hosts the title menu, constructs an
//! engine per run on top of a [`MacroquadSurface`], forwards pointer and
//! keyboard input, and draws the HUD around the field. All `macroquad::ui`
//! calls live inside the local `ui` module.

mod hud;
mod ui;

use std::{collections::VecDeque, sync::mpsc, time::Duration};

use anyhow::{Context, Result};
use glam::Vec2;
use lane_defence_core::{Selection, FIELD_HEIGHT, FIELD_WIDTH};
use lane_defence_engine::{Engine, EngineConfig, TickScheduler};
use lane_defence_rendering::{Canvas, Color, DisplayRect, Presentation, Surface, SurfaceError};
use macroquad::{
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
    math::Vec2 as MacroquadVec2,
    ui::root_ui,
};

use self::hud::HudState;

const HEADER_HEIGHT: f32 = 48.0;
const DOCK_HEIGHT: f32 = 104.0;
const MARGIN: f32 = 16.0;
const WAVE_BANNER_TEXT: &str = "A HUGE WAVE IS APPROACHING!";
const CARD_KEYS: [KeyCode; 5] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
];

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Opens the window and runs the menu and game loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine cannot be constructed on the window's
    /// drawing surface.
    pub fn run(self, presentation: Presentation, engine_config: EngineConfig) -> Result<()> {
        let Self {
            swap_interval,
            show_fps,
        } = self;
        let Presentation {
            window_title,
            clear_color,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: (FIELD_WIDTH + 2.0 * MARGIN) as i32,
            window_height: (FIELD_HEIGHT + HEADER_HEIGHT + DOCK_HEIGHT + 2.0 * MARGIN) as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (failure_sender, failure_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut scheduler = TickScheduler::default();
            let mut session: Option<Engine<MacroquadSurface, HudState>> = None;

            loop {
                if is_key_pressed(KeyCode::Q) {
                    break;
                }

                let dt = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                macroquad::window::clear_background(background);

                let screen = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let layout = FieldLayout::compute(screen);

                match session.as_mut() {
                    None => {
                        let play = ui::draw_menu(&mut root_ui(), to_macroquad_vec(screen))
                            || is_key_pressed(KeyCode::Enter);
                        if play {
                            let surface = MacroquadSurface::new(screen, layout.field);
                            match Engine::new(surface, HudState::default(), engine_config)
                                .context("failed to initialise the game engine")
                            {
                                Ok(mut engine) => {
                                    engine.start();
                                    scheduler.reset();
                                    session = Some(engine);
                                }
                                Err(error) => {
                                    let _ = failure_sender.send(Err(error));
                                    return;
                                }
                            }
                        }
                    }
                    Some(engine) => {
                        if is_key_pressed(KeyCode::Escape) {
                            engine.stop();
                            session = None;
                            macroquad::window::next_frame().await;
                            continue;
                        }

                        engine.surface_mut().set_layout(screen, layout.field);
                        forward_input(engine, &layout);

                        for _ in 0..scheduler.due(dt) {
                            engine.advance();
                        }
                        engine.render();
                        engine.host_mut().elapse(dt);

                        if draw_hud(engine, &layout, screen) {
                            session = None;
                        }
                    }
                }

                if show_fps {
                    if let Some(metrics) = fps_counter.record_frame(dt) {
                        tracing::info!(
                            fps = metrics.per_second,
                            trailing_fps = metrics.trailing_ten_seconds,
                            "frame rate"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        failure_receiver.try_recv().unwrap_or(Ok(()))?;

        Ok(())
    }
}

/// Forwards keyboard shortcuts, pointer motion and presses to the engine.
fn forward_input(engine: &mut Engine<MacroquadSurface, HudState>, layout: &FieldLayout) {
    if !engine.is_running() {
        return;
    }

    for (key, card) in CARD_KEYS.iter().zip(ui::CARDS) {
        if is_key_pressed(*key) {
            choose_card(engine, card);
        }
    }

    let (x, y) = mouse_position();
    let pointer = Vec2::new(x, y);
    engine.pointer_move(pointer, layout.field);
    if is_mouse_button_pressed(MouseButton::Left) && layout.field_contains(pointer) {
        engine.pointer_down();
    }
}

fn choose_card(engine: &mut Engine<MacroquadSurface, HudState>, card: Selection) {
    if let Some(selection) = engine.host_mut().choose(card) {
        engine.select(selection);
    }
}

/// Draws the header, dock and overlays. Returns `true` when the player left
/// the run through the game-over overlay.
fn draw_hud(
    engine: &mut Engine<MacroquadSurface, HudState>,
    layout: &FieldLayout,
    screen: Vec2,
) -> bool {
    macroquad::shapes::draw_rectangle(
        0.0,
        0.0,
        screen.x,
        layout.field.origin.y,
        macroquad::color::Color::from_rgba(30, 22, 14, 255),
    );
    let hud = engine.host().clone();
    macroquad::text::draw_text(
        &format!("Resources: {}", hud.resources().get()),
        layout.field.origin.x,
        layout.field.origin.y - 14.0,
        28.0,
        macroquad::color::YELLOW,
    );

    let pressed = ui::draw_dock(
        &mut root_ui(),
        ui::DockContext {
            origin: to_macroquad_vec(layout.dock_origin),
            size: to_macroquad_vec(layout.dock_size),
            resources: hud.resources(),
            selection: hud.selection(),
        },
    );
    if let Some(card) = pressed {
        choose_card(engine, card);
    }

    if hud.wave_banner_visible() {
        let font_size = 36.0;
        let dimensions = macroquad::text::measure_text(WAVE_BANNER_TEXT, None, 36, 1.0);
        let center = layout.field.origin + layout.field.size * 0.5;
        macroquad::text::draw_text(
            WAVE_BANNER_TEXT,
            center.x - dimensions.width * 0.5,
            center.y,
            font_size,
            macroquad::color::RED,
        );
    }

    if hud.is_game_over() {
        return ui::draw_game_over(&mut root_ui(), to_macroquad_vec(screen));
    }
    false
}

/// Screen-space placement of the header, field and dock.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FieldLayout {
    field: DisplayRect,
    dock_origin: Vec2,
    dock_size: Vec2,
}

impl FieldLayout {
    /// Fits the field between the header and the dock, preserving its aspect ratio.
    fn compute(screen: Vec2) -> Self {
        let available = Vec2::new(
            (screen.x - 2.0 * MARGIN).max(0.0),
            (screen.y - HEADER_HEIGHT - DOCK_HEIGHT - 2.0 * MARGIN).max(0.0),
        );
        let scale = (available.x / FIELD_WIDTH)
            .min(available.y / FIELD_HEIGHT)
            .max(0.0);
        let size = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) * scale;
        let origin = Vec2::new(
            MARGIN + (available.x - size.x) * 0.5,
            MARGIN + HEADER_HEIGHT + (available.y - size.y) * 0.5,
        );

        Self {
            field: DisplayRect::new(origin, size),
            dock_origin: Vec2::new(MARGIN, screen.y - DOCK_HEIGHT - MARGIN * 0.5),
            dock_size: Vec2::new((screen.x - 2.0 * MARGIN).max(0.0), DOCK_HEIGHT),
        }
    }

    fn field_contains(&self, point: Vec2) -> bool {
        let local = point - self.field.origin;
        local.x >= 0.0
            && local.y >= 0.0
            && local.x < self.field.size.x
            && local.y < self.field.size.y
    }
}

/// Drawing surface that maps field units onto the window through a [`DisplayRect`].
#[derive(Clone, Debug)]
pub struct MacroquadSurface {
    screen: Vec2,
    display: DisplayRect,
    field_size: Vec2,
}

impl MacroquadSurface {
    /// Creates a surface displaying the field inside `display` on a window of size `screen`.
    #[must_use]
    pub fn new(screen: Vec2, display: DisplayRect) -> Self {
        Self {
            screen,
            display,
            field_size: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
        }
    }

    /// Updates the window size and field placement after a resize.
    pub fn set_layout(&mut self, screen: Vec2, display: DisplayRect) {
        self.screen = screen;
        self.display = display;
    }

    fn scale(&self) -> f32 {
        if self.field_size.x <= 0.0 {
            return 1.0;
        }
        self.display.size.x / self.field_size.x
    }

    fn point(&self, field: Vec2) -> MacroquadVec2 {
        to_macroquad_vec(self.display.to_screen(field, self.field_size))
    }
}

impl Canvas for MacroquadSurface {
    fn clear(&mut self, size: Vec2) {
        let origin = self.point(Vec2::ZERO);
        let scale = self.scale();
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x * scale,
            size.y * scale,
            macroquad::color::BLACK,
        );
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let origin = self.point(origin);
        let scale = self.scale();
        macroquad::shapes::draw_rectangle(
            origin.x,
            origin.y,
            size.x * scale,
            size.y * scale,
            to_macroquad_color(color),
        );
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        macroquad::shapes::draw_triangle(
            self.point(a),
            self.point(b),
            self.point(c),
            to_macroquad_color(color),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let center = self.point(center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            radius * self.scale(),
            to_macroquad_color(color),
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color) {
        let center = self.point(center);
        let scale = self.scale();
        macroquad::shapes::draw_circle_lines(
            center.x,
            center.y,
            radius * scale,
            thickness * scale,
            to_macroquad_color(color),
        );
    }
}

impl Surface for MacroquadSurface {
    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError> {
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(SurfaceError::InvalidSize {
                width: size.x,
                height: size.y,
            });
        }
        if self.screen.x <= 0.0 || self.screen.y <= 0.0 {
            return Err(SurfaceError::Unavailable(
                "window has no drawable area".to_owned(),
            ));
        }
        self.field_size = size;
        Ok(())
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
