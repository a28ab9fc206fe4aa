#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world owns every entity collection of a run together with the frame
//! counter and the resource total. It is mutated exclusively through
//! [`apply`], which reports every observable change as an [`Event`].

mod attackers;
mod drops;
mod projectiles;
mod units;

use glam::Vec2;
use lane_defence_core::{
    AttackerKind, CellCoord, Command, DropId, DropSource, Event, Frame, PlacementError,
    Resources, UnitKind, GRID_ROWS,
};

use attackers::AttackerState;
use drops::DropRegistry;
use projectiles::ProjectileState;
use units::UnitRegistry;

/// Height above the field at which sky drops appear.
const SKY_DROP_Y: f32 = -50.0;

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    frame: Frame,
    resources: Resources,
    units: UnitRegistry,
    attackers: Vec<AttackerState>,
    projectiles: Vec<ProjectileState>,
    drops: DropRegistry,
    wave_active: bool,
    breached: bool,
}

impl World {
    /// Creates an empty world at frame zero with no resources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: Frame::default(),
            resources: Resources::ZERO,
            units: UnitRegistry::new(),
            attackers: Vec::new(),
            projectiles: Vec::new(),
            drops: DropRegistry::new(),
            wave_active: false,
            breached: false,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn set_resources(&mut self, total: Resources, out_events: &mut Vec<Event>) {
        self.resources = total;
        out_events.push(Event::ResourcesChanged { total });
    }

    fn spawn_attacker(
        &mut self,
        row: u32,
        kind: AttackerKind,
        speed: f32,
        out_events: &mut Vec<Event>,
    ) {
        if row >= GRID_ROWS {
            tracing::warn!(row, "ignoring attacker spawn outside the field");
            return;
        }
        self.attackers.push(AttackerState::spawn(row, kind, speed));
        out_events.push(Event::AttackerSpawned { row, kind });
    }

    fn collect(&mut self, drop: DropId, out_events: &mut Vec<Event>) {
        let Some(collected) = self.drops.take(drop) else {
            tracing::debug!(drop = drop.get(), "drop vanished before collection");
            return;
        };
        out_events.push(Event::ResourceCollected {
            drop,
            value: collected.value,
        });
        let total = self.resources.saturating_add(collected.value);
        self.set_resources(total, out_events);
    }

    fn place_unit(&mut self, kind: UnitKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let outcome = self.validate_placement(kind, cell);
        let remaining = match outcome {
            Ok(remaining) => remaining,
            Err(reason) => {
                tracing::debug!(?kind, ?cell, ?reason, "placement rejected");
                out_events.push(Event::PlacementRejected { kind, cell, reason });
                return;
            }
        };

        self.set_resources(remaining, out_events);
        self.units.insert(kind, cell);
        out_events.push(Event::UnitPlaced { kind, cell });
    }

    fn validate_placement(
        &self,
        kind: UnitKind,
        cell: CellCoord,
    ) -> Result<Resources, PlacementError> {
        if !cell.is_on_field() {
            return Err(PlacementError::OutOfBounds);
        }
        if self.units.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        self.resources
            .checked_sub(kind.cost())
            .ok_or(PlacementError::InsufficientResources)
    }

    fn remove_unit(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        match self.units.remove(cell) {
            Some(unit) => out_events.push(Event::UnitRemoved {
                kind: unit.kind(),
                cell,
            }),
            None => out_events.push(Event::RemovalRejected { cell }),
        }
    }

    /// Runs the per-entity update, collision and cleanup passes in a fixed order.
    fn resolve_frame(&mut self, out_events: &mut Vec<Event>) {
        units::update(
            &mut self.units,
            &mut self.attackers,
            &mut self.projectiles,
            &mut self.drops,
            out_events,
        );

        if let Some(row) = attackers::advance(&mut self.attackers, &mut self.units) {
            if !self.breached {
                self.breached = true;
                out_events.push(Event::AttackerBreached {
                    row,
                    frame: self.frame,
                });
            }
        }

        projectiles::advance(&mut self.projectiles, &mut self.attackers);
        self.drops.settle();

        self.units.remove_destroyed(out_events);
        attackers::remove_defeated(&mut self.attackers, out_events);
        self.projectiles.retain(|projectile| !projectile.spent);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResetRun => {
            world.reset();
            out_events.push(Event::RunReset);
            out_events.push(Event::ResourcesChanged {
                total: world.resources,
            });
        }
        Command::AdvanceFrame => {
            world.frame = world.frame.next();
            out_events.push(Event::FrameAdvanced { frame: world.frame });
        }
        Command::BeginWave => {
            if !world.wave_active {
                world.wave_active = true;
                out_events.push(Event::WaveStarted { frame: world.frame });
            }
        }
        Command::SpawnAttacker { row, kind, speed } => {
            world.spawn_attacker(row, kind, speed, out_events);
        }
        Command::DropResource { x, resting_y } => {
            world.drops.spawn(
                Vec2::new(x, SKY_DROP_Y),
                resting_y,
                DropSource::Sky,
                out_events,
            );
        }
        Command::ResolveFrame => world.resolve_frame(out_events),
        Command::CollectResource { drop } => world.collect(drop, out_events),
        Command::PlaceUnit { kind, cell } => world.place_unit(kind, cell, out_events),
        Command::RemoveUnit { cell } => world.remove_unit(cell, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use lane_defence_core::{
        AttackerSnapshot, CellCoord, DropSnapshot, Frame, ProjectileSnapshot, Resources,
        UnitSnapshot,
    };

    /// Frame counter of the current run.
    #[must_use]
    pub fn frame(world: &World) -> Frame {
        world.frame
    }

    /// Spendable resource total.
    #[must_use]
    pub fn resources(world: &World) -> Resources {
        world.resources
    }

    /// Reports whether the one-time wave has started.
    #[must_use]
    pub fn wave_active(world: &World) -> bool {
        world.wave_active
    }

    /// Reports whether an attacker crossed the near edge during this run.
    #[must_use]
    pub fn breached(world: &World) -> bool {
        world.breached
    }

    /// Returns the unit occupying the provided cell, if any.
    #[must_use]
    pub fn unit_at(world: &World, cell: CellCoord) -> Option<UnitSnapshot> {
        world.units.occupant(cell).map(|unit| unit.snapshot())
    }

    /// Captures every placed unit in placement order.
    #[must_use]
    pub fn units(world: &World) -> Vec<UnitSnapshot> {
        world.units.iter().map(|unit| unit.snapshot()).collect()
    }

    /// Captures every attacker in spawn order.
    #[must_use]
    pub fn attackers(world: &World) -> Vec<AttackerSnapshot> {
        world
            .attackers
            .iter()
            .map(|attacker| attacker.snapshot())
            .collect()
    }

    /// Captures every projectile in firing order.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world
            .projectiles
            .iter()
            .map(|projectile| projectile.snapshot())
            .collect()
    }

    /// Captures every resource drop in creation order, oldest first.
    #[must_use]
    pub fn drops(world: &World) -> Vec<DropSnapshot> {
        world.drops.iter().map(|drop| drop.snapshot()).collect()
    }
}

/// Setup helpers that bypass the regular economy for tests and tooling.
#[cfg(feature = "scaffolding")]
pub mod scaffolding {
    use super::World;
    use lane_defence_core::{Event, Resources};

    /// Credits `amount` to the resource total without a drop being collected.
    pub fn grant_resources(world: &mut World, amount: Resources, out_events: &mut Vec<Event>) {
        let total = world.resources.saturating_add(amount);
        world.set_resources(total, out_events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn reset_reports_an_empty_total() {
        let mut world = World::new();
        let events = applied(&mut world, Command::ResetRun);
        assert_eq!(
            events,
            vec![
                Event::RunReset,
                Event::ResourcesChanged {
                    total: Resources::ZERO
                }
            ]
        );
    }

    #[test]
    fn wave_starts_only_once() {
        let mut world = World::new();
        assert_eq!(applied(&mut world, Command::BeginWave).len(), 1);
        assert!(applied(&mut world, Command::BeginWave).is_empty());
        assert!(query::wave_active(&world));
    }

    #[test]
    fn placement_without_funds_is_rejected() {
        let mut world = World::new();
        let cell = CellCoord::new(0, 0);
        let events = applied(
            &mut world,
            Command::PlaceUnit {
                kind: UnitKind::Producer,
                cell,
            },
        );

        assert_eq!(
            events,
            vec![Event::PlacementRejected {
                kind: UnitKind::Producer,
                cell,
                reason: PlacementError::InsufficientResources,
            }]
        );
        assert!(query::unit_at(&world, cell).is_none());
    }

    #[test]
    fn placement_outside_the_field_is_rejected() {
        let mut world = World::new();
        let events = applied(
            &mut world,
            Command::PlaceUnit {
                kind: UnitKind::Wall,
                cell: CellCoord::new(9, 0),
            },
        );
        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::OutOfBounds,
                ..
            }]
        ));
    }

    #[test]
    fn spawns_outside_the_lanes_are_ignored() {
        let mut world = World::new();
        let events = applied(
            &mut world,
            Command::SpawnAttacker {
                row: GRID_ROWS,
                kind: AttackerKind::Standard,
                speed: 0.1,
            },
        );
        assert!(events.is_empty());
        assert!(query::attackers(&world).is_empty());
    }

    #[test]
    fn sky_drops_start_above_the_field() {
        let mut world = World::new();
        let _ = applied(
            &mut world,
            Command::DropResource {
                x: 120.0,
                resting_y: 200.0,
            },
        );
        let drops = query::drops(&world);
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].position, Vec2::new(120.0, SKY_DROP_Y));
        assert_eq!(drops[0].source, DropSource::Sky);
    }
}
