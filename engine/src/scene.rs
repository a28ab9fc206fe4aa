//! Builds the per-frame scene from world snapshots.

use glam::Vec2;
use lane_defence_core::{CellCoord, Selection};
use lane_defence_rendering::{
    AttackerPresentation, DropPresentation, HoverHighlight, HoverStyle, Scene, UnitPresentation,
};
use lane_defence_world::{query, World};

pub(crate) fn describe(world: &World, selection: Option<Selection>, pointer: Vec2) -> Scene {
    let hover = selection.and_then(|selection| {
        let cell = CellCoord::containing(pointer)?;
        let style = match selection {
            Selection::Unit(_) => HoverStyle::Place,
            Selection::RemovalTool if query::unit_at(world, cell).is_some() => {
                HoverStyle::RemoveTarget
            }
            Selection::RemovalTool => HoverStyle::RemoveEmpty,
        };
        Some(HoverHighlight { cell, style })
    });

    Scene {
        hover,
        units: query::units(world)
            .into_iter()
            .map(|unit| UnitPresentation {
                cell: unit.cell,
                behavior: unit.behavior,
                health_ratio: unit.health / unit.max_health,
            })
            .collect(),
        attackers: query::attackers(world)
            .into_iter()
            .map(|attacker| AttackerPresentation {
                position: attacker.position,
                kind: attacker.kind,
                health: attacker.health,
            })
            .collect(),
        projectiles: query::projectiles(world)
            .into_iter()
            .map(|projectile| projectile.position)
            .collect(),
        drops: query::drops(world)
            .into_iter()
            .map(|drop| DropPresentation::new(drop.position, drop.life))
            .collect(),
    }
}
