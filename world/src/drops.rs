//! Collectible resource drops.

use glam::Vec2;
use lane_defence_core::{DropId, DropSnapshot, DropSource, Event, Resources};

const DROP_VALUE: Resources = Resources::new(25);
const FALL_SPEED: f32 = 1.5;
const DROP_LIFETIME: u64 = 900;

#[derive(Clone, Debug)]
pub(crate) struct DropState {
    pub(crate) id: DropId,
    pub(crate) position: Vec2,
    pub(crate) resting_y: f32,
    pub(crate) value: Resources,
    pub(crate) life: u64,
    pub(crate) source: DropSource,
}

impl DropState {
    pub(crate) fn snapshot(&self) -> DropSnapshot {
        DropSnapshot {
            id: self.id,
            position: self.position,
            resting_y: self.resting_y,
            value: self.value,
            life: self.life,
            source: self.source,
        }
    }
}

/// Registry that stores live drops in creation order and allocates identifiers.
#[derive(Debug)]
pub(crate) struct DropRegistry {
    entries: Vec<DropState>,
    next_drop_id: DropId,
}

impl DropRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_drop_id: DropId::new(0),
        }
    }

    pub(crate) fn spawn(
        &mut self,
        position: Vec2,
        resting_y: f32,
        source: DropSource,
        out_events: &mut Vec<Event>,
    ) {
        let id = self.next_drop_id;
        self.next_drop_id = DropId::new(id.get().wrapping_add(1));
        self.entries.push(DropState {
            id,
            position,
            resting_y,
            value: DROP_VALUE,
            life: 0,
            source,
        });
        out_events.push(Event::ResourceDropped { drop: id, source });
    }

    pub(crate) fn take(&mut self, id: DropId) -> Option<DropState> {
        let index = self.entries.iter().position(|drop| drop.id == id)?;
        Some(self.entries.remove(index))
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DropState> {
        self.entries.iter()
    }

    /// Lets every drop fall toward its resting height and ages it, expiring old drops.
    pub(crate) fn settle(&mut self) {
        for drop in &mut self.entries {
            if drop.position.y < drop.resting_y {
                drop.position.y += FALL_SPEED;
            }
            drop.life = drop.life.saturating_add(1);
        }
        self.entries.retain(|drop| drop.life < DROP_LIFETIME);
    }
}
