//! Projectile flight and hit resolution.

use glam::Vec2;
use lane_defence_core::{ProjectileSnapshot, CELL_SIZE, FIELD_WIDTH, PROJECTILE_SIZE};

use crate::attackers::AttackerState;

const PROJECTILE_SPEED: f32 = 6.0;
const PROJECTILE_POWER: f32 = 20.0;

#[derive(Clone, Debug)]
pub(crate) struct ProjectileState {
    pub(crate) position: Vec2,
    pub(crate) speed: f32,
    pub(crate) power: f32,
    pub(crate) spent: bool,
}

impl ProjectileState {
    pub(crate) fn new(position: Vec2) -> Self {
        Self {
            position,
            speed: PROJECTILE_SPEED,
            power: PROJECTILE_POWER,
            spent: false,
        }
    }

    fn hits(&self, attacker: &AttackerState) -> bool {
        let x = self.position.x;
        let y = self.position.y;
        let target = attacker.position;
        x < target.x + CELL_SIZE
            && x + PROJECTILE_SIZE > target.x
            && y > target.y
            && y < target.y + CELL_SIZE
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            position: self.position,
            speed: self.speed,
            power: self.power,
            spent: self.spent,
        }
    }
}

/// Moves every projectile and damages each living attacker it overlaps.
///
/// A projectile that overlaps several attackers on the same frame damages all
/// of them before it is flagged as spent.
pub(crate) fn advance(projectiles: &mut [ProjectileState], attackers: &mut [AttackerState]) {
    for projectile in projectiles.iter_mut() {
        projectile.position.x += projectile.speed;

        for attacker in attackers.iter_mut().filter(|attacker| attacker.is_alive()) {
            if projectile.hits(attacker) {
                attacker.health -= projectile.power;
                projectile.spent = true;
            }
        }

        if projectile.position.x > FIELD_WIDTH {
            projectile.spent = true;
        }
    }
}
