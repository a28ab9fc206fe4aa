//! Authoritative unit state and the per-frame unit behaviours.

use glam::Vec2;
use lane_defence_core::{
    CellCoord, ConsumerState, DropSource, Event, UnitBehavior, UnitKind, UnitSnapshot, CELL_SIZE,
};

use crate::{attackers::AttackerState, drops::DropRegistry, projectiles::ProjectileState};

const PRODUCER_INTERVAL: u64 = 1000;
const PRODUCER_DROP_FALL: f32 = 20.0;
const RANGED_INTERVAL: u64 = 100;
const CONSUMER_REACH: f32 = 120.0;
const CONSUMER_REST_FRAMES: u64 = 1800;
const MUZZLE_OFFSET: Vec2 = Vec2::new(50.0, 35.0);

/// Placed unit stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct UnitState {
    pub(crate) cell: CellCoord,
    pub(crate) behavior: UnitBehavior,
    pub(crate) health: f32,
    pub(crate) age: u64,
}

impl UnitState {
    fn new(kind: UnitKind, cell: CellCoord) -> Self {
        Self {
            cell,
            behavior: kind.initial_behavior(),
            health: kind.base_health(),
            age: 0,
        }
    }

    pub(crate) fn kind(&self) -> UnitKind {
        self.behavior.kind()
    }

    pub(crate) fn origin(&self) -> Vec2 {
        self.cell.origin()
    }

    /// Reports whether an attacker's left edge lies within this unit's cell span.
    pub(crate) fn overlaps(&self, attacker_x: f32) -> bool {
        let x = self.origin().x;
        attacker_x < x + CELL_SIZE && attacker_x + CELL_SIZE > x
    }

    pub(crate) fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            cell: self.cell,
            behavior: self.behavior,
            health: self.health,
            max_health: self.kind().base_health(),
            age: self.age,
        }
    }
}

/// Registry that stores placed units in placement order.
#[derive(Debug, Default)]
pub(crate) struct UnitRegistry {
    entries: Vec<UnitState>,
}

impl UnitRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<&UnitState> {
        self.entries.iter().find(|unit| unit.cell == cell)
    }

    pub(crate) fn insert(&mut self, kind: UnitKind, cell: CellCoord) {
        self.entries.push(UnitState::new(kind, cell));
    }

    pub(crate) fn remove(&mut self, cell: CellCoord) -> Option<UnitState> {
        let index = self.entries.iter().position(|unit| unit.cell == cell)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &UnitState> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut UnitState> {
        self.entries.iter_mut()
    }

    /// Drops every unit whose health ran out, preserving the order of survivors.
    pub(crate) fn remove_destroyed(&mut self, out_events: &mut Vec<Event>) {
        self.entries.retain(|unit| {
            if unit.health > 0.0 {
                return true;
            }
            out_events.push(Event::UnitDestroyed {
                kind: unit.kind(),
                cell: unit.cell,
            });
            false
        });
    }
}

/// Runs the behaviour of every placed unit for a single frame.
pub(crate) fn update(
    units: &mut UnitRegistry,
    attackers: &mut [AttackerState],
    projectiles: &mut Vec<ProjectileState>,
    drops: &mut DropRegistry,
    out_events: &mut Vec<Event>,
) {
    for unit in units.iter_mut() {
        unit.age = unit.age.saturating_add(1);
        let origin = unit.origin();
        let row = unit.cell.row();

        match unit.behavior {
            UnitBehavior::Producer => {
                if unit.age % PRODUCER_INTERVAL == 0 {
                    drops.spawn(
                        origin,
                        origin.y + PRODUCER_DROP_FALL,
                        DropSource::Producer,
                        out_events,
                    );
                }
            }
            UnitBehavior::Ranged => {
                if unit.age % RANGED_INTERVAL != 0 {
                    continue;
                }
                let target_ahead = attackers.iter().any(|attacker| {
                    attacker.is_alive() && attacker.row == row && attacker.position.x > origin.x
                });
                if target_ahead {
                    projectiles.push(ProjectileState::new(origin + MUZZLE_OFFSET));
                    out_events.push(Event::ProjectileFired { from: unit.cell });
                }
            }
            UnitBehavior::Wall => {}
            UnitBehavior::Consumer(ConsumerState::Idle) => {
                let target = attackers
                    .iter_mut()
                    .filter(|attacker| {
                        attacker.is_alive()
                            && attacker.row == row
                            && attacker.position.x > origin.x
                            && attacker.position.x < origin.x + CONSUMER_REACH
                    })
                    .min_by(|a, b| a.position.x.total_cmp(&b.position.x));
                if let Some(attacker) = target {
                    attacker.health = 0.0;
                    unit.behavior = UnitBehavior::Consumer(ConsumerState::Busy);
                    unit.age = 0;
                    out_events.push(Event::AttackerConsumed { consumer: unit.cell });
                }
            }
            UnitBehavior::Consumer(ConsumerState::Busy) => {
                if unit.age >= CONSUMER_REST_FRAMES {
                    unit.behavior = UnitBehavior::Consumer(ConsumerState::Idle);
                    unit.age = 0;
                }
            }
        }
    }
}
