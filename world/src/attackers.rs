//! Attacker state and lane advancement.

use glam::Vec2;
use lane_defence_core::{row_y, AttackerKind, AttackerSnapshot, Event, FIELD_WIDTH};

use crate::units::UnitRegistry;

/// Health removed from a blocking unit for every frame an attacker chews on it.
const CHEW_DAMAGE: f32 = 0.2;

#[derive(Clone, Debug)]
pub(crate) struct AttackerState {
    pub(crate) position: Vec2,
    pub(crate) row: u32,
    pub(crate) kind: AttackerKind,
    pub(crate) health: f32,
    pub(crate) speed: f32,
    pub(crate) movement: f32,
}

impl AttackerState {
    /// Places a fresh attacker at the far edge of `row`.
    pub(crate) fn spawn(row: u32, kind: AttackerKind, speed: f32) -> Self {
        Self {
            position: Vec2::new(FIELD_WIDTH, row_y(row)),
            row,
            kind,
            health: kind.base_health(),
            speed,
            movement: speed,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub(crate) fn snapshot(&self) -> AttackerSnapshot {
        AttackerSnapshot {
            position: self.position,
            row: self.row,
            kind: self.kind,
            health: self.health,
            speed: self.speed,
            movement: self.movement,
        }
    }
}

/// Advances every living attacker, chewing on any unit that blocks it.
///
/// Returns the row of the first attacker that crossed the near edge this frame.
pub(crate) fn advance(
    attackers: &mut [AttackerState],
    units: &mut UnitRegistry,
) -> Option<u32> {
    let mut breach = None;

    for attacker in attackers.iter_mut().filter(|attacker| attacker.is_alive()) {
        let mut movement = attacker.speed;
        for unit in units
            .iter_mut()
            .filter(|unit| unit.cell.row() == attacker.row)
        {
            if unit.overlaps(attacker.position.x) {
                movement = 0.0;
                unit.health -= CHEW_DAMAGE;
            }
        }

        attacker.movement = movement;
        attacker.position.x -= movement;

        if attacker.position.x < 0.0 && breach.is_none() {
            breach = Some(attacker.row);
        }
    }

    breach
}

/// Drops every attacker whose health ran out, preserving the order of survivors.
pub(crate) fn remove_defeated(attackers: &mut Vec<AttackerState>, out_events: &mut Vec<Event>) {
    attackers.retain(|attacker| {
        if attacker.is_alive() {
            return true;
        }
        out_events.push(Event::AttackerDefeated {
            row: attacker.row,
            kind: attacker.kind,
        });
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{CellCoord, UnitKind};

    #[test]
    fn unblocked_attacker_moves_by_its_speed() {
        let mut attackers = vec![AttackerState::spawn(3, AttackerKind::Standard, 0.125)];
        let breach = advance(&mut attackers, &mut UnitRegistry::new());

        assert!(breach.is_none());
        assert_eq!(attackers[0].position, Vec2::new(719.875, 240.0));
        assert_eq!(attackers[0].movement, 0.125);
    }

    #[test]
    fn blocked_attacker_stays_put_and_chews() {
        let mut units = UnitRegistry::new();
        units.insert(UnitKind::Wall, CellCoord::new(8, 0));
        let mut attackers = vec![AttackerState::spawn(0, AttackerKind::Armored, 0.1)];
        attackers[0].position.x = 700.0;

        let _ = advance(&mut attackers, &mut units);

        assert_eq!(attackers[0].position.x, 700.0);
        assert_eq!(attackers[0].movement, 0.0);
        let wall = units.occupant(CellCoord::new(8, 0)).expect("wall present");
        assert!((wall.health - 399.8).abs() < 1e-3);
    }

    #[test]
    fn every_overlapping_unit_takes_damage() {
        let mut units = UnitRegistry::new();
        units.insert(UnitKind::Wall, CellCoord::new(4, 2));
        units.insert(UnitKind::Producer, CellCoord::new(5, 2));
        let mut attackers = vec![AttackerState::spawn(2, AttackerKind::Standard, 0.1)];
        attackers[0].position.x = 360.0;

        let _ = advance(&mut attackers, &mut units);

        assert!(units.iter().all(|unit| unit.health < unit.kind().base_health()));
    }

    #[test]
    fn crossing_the_near_edge_reports_a_breach() {
        let mut attackers = vec![AttackerState::spawn(4, AttackerKind::Standard, 0.12)];
        attackers[0].position.x = 0.1;

        assert_eq!(advance(&mut attackers, &mut UnitRegistry::new()), Some(4));
    }

    #[test]
    fn defeated_attackers_are_skipped() {
        let mut attackers = vec![AttackerState::spawn(1, AttackerKind::Standard, 0.1)];
        attackers[0].health = 0.0;

        let _ = advance(&mut attackers, &mut UnitRegistry::new());
        assert_eq!(attackers[0].position.x, FIELD_WIDTH);

        let mut events = Vec::new();
        remove_defeated(&mut attackers, &mut events);
        assert!(attackers.is_empty());
        assert_eq!(
            events,
            vec![Event::AttackerDefeated {
                row: 1,
                kind: AttackerKind::Standard
            }]
        );
    }
}
