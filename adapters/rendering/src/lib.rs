#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.
//!
//! Adapters implement [`Canvas`] (and [`Surface`] when they own a resizable
//! drawing target); [`draw_scene`] turns a declarative [`Scene`] into the
//! primitive calls those traits expose.

mod draw;
mod scene;

use glam::Vec2;
use thiserror::Error;

pub use draw::{draw_scene, palette};
pub use scene::{
    AttackerPresentation, DropPresentation, HoverHighlight, HoverStyle, Scene, UnitPresentation,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self::from_rgba_u8(red, green, blue, 1.0)
    }

    /// Creates a color from byte RGB values and a floating point alpha.
    #[must_use]
    pub const fn from_rgba_u8(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha,
        }
    }

    /// Returns the color with its alpha scaled by `opacity`.
    #[must_use]
    pub fn faded(self, opacity: f32) -> Self {
        Self {
            alpha: self.alpha * opacity.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Immediate-mode drawing target expressed in field units.
pub trait Canvas {
    /// Clears the region spanning `size` from the origin.
    fn clear(&mut self, size: Vec2);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Fills a triangle.
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Strokes the outline of a circle.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: Color);
}

/// Drawing target owned by the host that the engine sizes at construction.
pub trait Surface: Canvas {
    /// Sizes the drawing buffer to the provided dimensions in field units.
    fn resize(&mut self, size: Vec2) -> Result<(), SurfaceError>;
}

/// Errors raised when a surface cannot provide a usable drawing context.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// Requested dimensions are not strictly positive.
    #[error("surface dimensions must be positive (received {width}x{height})")]
    InvalidSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// The host cannot supply a drawing context.
    #[error("drawing context unavailable: {0}")]
    Unavailable(String),
}

/// On-screen rectangle the field is displayed in, used to map pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    /// Upper-left corner of the displayed field in screen pixels.
    pub origin: Vec2,
    /// Displayed size of the field in screen pixels.
    pub size: Vec2,
}

impl DisplayRect {
    /// Creates a new display rectangle.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Maps a screen position into field coordinates, compensating for any
    /// scaling between the displayed size and `field_size`.
    #[must_use]
    pub fn to_field(&self, screen: Vec2, field_size: Vec2) -> Vec2 {
        let local = screen - self.origin;
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return local;
        }
        local * (field_size / self.size)
    }

    /// Maps a field position onto the screen.
    #[must_use]
    pub fn to_screen(&self, field: Vec2, field_size: Vec2) -> Vec2 {
        if field_size.x <= 0.0 || field_size.y <= 0.0 {
            return self.origin + field;
        }
        self.origin + field * (self.size / field_size)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame outside the field.
    pub clear_color: Color,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rect_compensates_for_scaling() {
        let display = DisplayRect::new(Vec2::new(40.0, 20.0), Vec2::new(360.0, 200.0));
        let field = Vec2::new(720.0, 400.0);

        assert_eq!(
            display.to_field(Vec2::new(220.0, 120.0), field),
            Vec2::new(360.0, 200.0)
        );
        assert_eq!(
            display.to_screen(Vec2::new(360.0, 200.0), field),
            Vec2::new(220.0, 120.0)
        );
    }

    #[test]
    fn degenerate_display_falls_back_to_offset_only() {
        let display = DisplayRect::new(Vec2::new(10.0, 10.0), Vec2::ZERO);
        assert_eq!(
            display.to_field(Vec2::new(15.0, 30.0), Vec2::new(720.0, 400.0)),
            Vec2::new(5.0, 20.0)
        );
    }

    #[test]
    fn faded_scales_alpha() {
        let color = Color::from_rgba_u8(255, 0, 0, 0.5).faded(0.5);
        assert_eq!(color.alpha, 0.25);
        assert_eq!(color.red, 1.0);
    }

    #[test]
    fn surface_error_reports_dimensions() {
        let error = SurfaceError::InvalidSize {
            width: 0.0,
            height: 400.0,
        };
        assert_eq!(
            error.to_string(),
            "surface dimensions must be positive (received 0x400)"
        );
    }
}
