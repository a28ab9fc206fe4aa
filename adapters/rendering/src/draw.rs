//! Draw pass that turns a [`Scene`] into canvas primitives.

use glam::Vec2;
use lane_defence_core::{
    AttackerKind, CellCoord, ConsumerState, UnitBehavior, CELL_SIZE, DROP_SIZE, FIELD_HEIGHT,
    FIELD_WIDTH, GRID_COLUMNS, GRID_ROWS,
};

use crate::{
    scene::{AttackerPresentation, HoverStyle, UnitPresentation},
    Canvas, Scene,
};

const PROJECTILE_RADIUS: f32 = 5.0;
const DROP_OUTLINE: f32 = 2.0;
const WOUNDED_BELOW: f32 = 50.0;

/// Colors used by the draw pass.
pub mod palette {
    use crate::Color;

    /// Even checkerboard cells.
    pub const GRASS_LIGHT: Color = Color::from_rgb_u8(0x5d, 0x9f, 0x46);
    /// Odd checkerboard cells.
    pub const GRASS_DARK: Color = Color::from_rgb_u8(0x53, 0x93, 0x3e);
    /// Hover tint while placing a unit.
    pub const HOVER_PLACE: Color = Color::from_rgba_u8(255, 255, 255, 0.3);
    /// Hover tint while the removal tool is over a unit.
    pub const HOVER_REMOVE_TARGET: Color = Color::from_rgba_u8(255, 0, 0, 0.5);
    /// Hover tint while the removal tool is over an empty cell.
    pub const HOVER_REMOVE_EMPTY: Color = Color::from_rgba_u8(255, 255, 255, 0.2);
    /// Producer petals.
    pub const PRODUCER: Color = Color::from_rgb_u8(0xf6, 0xc2, 0x06);
    /// Producer centre.
    pub const PRODUCER_CORE: Color = Color::from_rgb_u8(0x6b, 0x4e, 0x08);
    /// Ranged unit body.
    pub const RANGED: Color = Color::from_rgb_u8(0x75, 0xd3, 0x36);
    /// Ranged unit barrel.
    pub const RANGED_BARREL: Color = Color::from_rgb_u8(0x50, 0xa0, 0x20);
    /// Wall unit.
    pub const WALL: Color = Color::from_rgb_u8(0xa0, 0x52, 0x2d);
    /// Consumer head while idle.
    pub const CONSUMER_IDLE: Color = Color::from_rgb_u8(0x7b, 0x1f, 0xa2);
    /// Consumer head while resting.
    pub const CONSUMER_BUSY: Color = Color::from_rgb_u8(0x4a, 0x14, 0x8c);
    /// Consumer mouth.
    pub const MOUTH: Color = Color::from_rgb_u8(255, 255, 255);
    /// Unit health bar.
    pub const HEALTH: Color = Color::from_rgb_u8(255, 0, 0);
    /// Attacker body above the wounded threshold.
    pub const ATTACKER: Color = Color::from_rgb_u8(0x2e, 0x7d, 0x32);
    /// Attacker body at or below the wounded threshold.
    pub const ATTACKER_WOUNDED: Color = Color::from_rgb_u8(0x1b, 0x5e, 0x20);
    /// Attacker eyes.
    pub const EYES: Color = Color::from_rgb_u8(0, 0, 0);
    /// Armored attacker cone.
    pub const CONE: Color = Color::from_rgb_u8(0xff, 0x98, 0x00);
    /// Projectile.
    pub const PROJECTILE: Color = Color::from_rgb_u8(0x00, 0xff, 0x00);
    /// Resource drop fill.
    pub const DROP: Color = Color::from_rgb_u8(255, 255, 0);
    /// Resource drop outline.
    pub const DROP_OUTLINE: Color = Color::from_rgb_u8(255, 165, 0);
}

/// Draws the full scene: grid, hover, units, attackers, projectiles, drops.
pub fn draw_scene<C: Canvas + ?Sized>(scene: &Scene, canvas: &mut C) {
    canvas.clear(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));

    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            let color = if (column + row) % 2 == 0 {
                palette::GRASS_LIGHT
            } else {
                palette::GRASS_DARK
            };
            canvas.fill_rect(
                CellCoord::new(column, row).origin(),
                Vec2::splat(CELL_SIZE),
                color,
            );
        }
    }

    if let Some(hover) = scene.hover {
        let color = match hover.style {
            HoverStyle::Place => palette::HOVER_PLACE,
            HoverStyle::RemoveTarget => palette::HOVER_REMOVE_TARGET,
            HoverStyle::RemoveEmpty => palette::HOVER_REMOVE_EMPTY,
        };
        canvas.fill_rect(hover.cell.origin(), Vec2::splat(CELL_SIZE), color);
    }

    for unit in &scene.units {
        draw_unit(unit, canvas);
    }

    for attacker in &scene.attackers {
        draw_attacker(attacker, canvas);
    }

    for center in &scene.projectiles {
        canvas.fill_circle(*center, PROJECTILE_RADIUS, palette::PROJECTILE);
    }

    let radius = DROP_SIZE * 0.5;
    for drop in &scene.drops {
        let center = drop.position + Vec2::splat(radius);
        canvas.fill_circle(center, radius, palette::DROP.faded(drop.opacity));
        canvas.stroke_circle(
            center,
            radius,
            DROP_OUTLINE,
            palette::DROP_OUTLINE.faded(drop.opacity),
        );
    }
}

fn draw_unit<C: Canvas + ?Sized>(unit: &UnitPresentation, canvas: &mut C) {
    let origin = unit.cell.origin();
    let rect = |x: f32, y: f32| origin + Vec2::new(x, y);

    match unit.behavior {
        UnitBehavior::Producer => {
            canvas.fill_rect(rect(20.0, 20.0), Vec2::splat(40.0), palette::PRODUCER);
            canvas.fill_rect(rect(30.0, 30.0), Vec2::splat(20.0), palette::PRODUCER_CORE);
        }
        UnitBehavior::Ranged => {
            canvas.fill_rect(rect(20.0, 20.0), Vec2::splat(30.0), palette::RANGED);
            canvas.fill_rect(
                rect(50.0, 25.0),
                Vec2::new(20.0, 10.0),
                palette::RANGED_BARREL,
            );
        }
        UnitBehavior::Wall => {
            canvas.fill_rect(rect(15.0, 15.0), Vec2::splat(50.0), palette::WALL);
        }
        UnitBehavior::Consumer(ConsumerState::Idle) => {
            canvas.fill_rect(rect(15.0, 10.0), Vec2::splat(50.0), palette::CONSUMER_IDLE);
            canvas.fill_triangle(
                rect(65.0, 20.0),
                rect(45.0, 35.0),
                rect(65.0, 50.0),
                palette::MOUTH,
            );
        }
        UnitBehavior::Consumer(ConsumerState::Busy) => {
            canvas.fill_rect(rect(15.0, 10.0), Vec2::splat(50.0), palette::CONSUMER_BUSY);
            canvas.fill_rect(rect(55.0, 30.0), Vec2::splat(10.0), palette::MOUTH);
        }
    }

    if unit.health_ratio < 1.0 {
        let width = 60.0 * unit.health_ratio.max(0.0);
        canvas.fill_rect(rect(10.0, 70.0), Vec2::new(width, 5.0), palette::HEALTH);
    }
}

fn draw_attacker<C: Canvas + ?Sized>(attacker: &AttackerPresentation, canvas: &mut C) {
    let at = |x: f32, y: f32| attacker.position + Vec2::new(x, y);
    let body = if attacker.health > WOUNDED_BELOW {
        palette::ATTACKER
    } else {
        palette::ATTACKER_WOUNDED
    };

    canvas.fill_rect(at(20.0, 10.0), Vec2::new(40.0, 60.0), body);
    canvas.fill_rect(at(30.0, 20.0), Vec2::splat(5.0), palette::EYES);
    canvas.fill_rect(at(45.0, 20.0), Vec2::splat(5.0), palette::EYES);

    if attacker.kind == AttackerKind::Armored {
        canvas.fill_triangle(at(25.0, 10.0), at(55.0, 10.0), at(40.0, -20.0), palette::CONE);
    }
}
