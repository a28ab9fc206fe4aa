#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure interaction system that resolves pointer presses into collection,
//! placement and removal commands.

use glam::Vec2;
use lane_defence_core::{CellCoord, Command, DropSnapshot, Selection, DROP_SIZE};

/// Distance from a drop's centre within which a press collects it.
pub const COLLECT_RADIUS: f32 = DROP_SIZE;

/// Single pointer press captured by the host, in field coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerPress {
    /// Field-local position of the press.
    pub at: Vec2,
    /// Action the player had selected when pressing.
    pub selection: Option<Selection>,
}

impl PointerPress {
    /// Creates a new press descriptor.
    #[must_use]
    pub const fn new(at: Vec2, selection: Option<Selection>) -> Self {
        Self { at, selection }
    }
}

/// Interaction system that translates pointer presses into world commands.
#[derive(Debug, Default, Clone)]
pub struct Interaction;

impl Interaction {
    /// Creates a new interaction system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a single press against the current drops and occupancy.
    ///
    /// Drops take priority over the selection and are hit-tested newest
    /// first, so only the topmost drop under the pointer is collected. The
    /// `occupied` closure should mirror the world's `query::unit_at` helper.
    pub fn handle<F>(
        &mut self,
        press: PointerPress,
        drops: &[DropSnapshot],
        mut occupied: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> bool,
    {
        if let Some(drop) = drops
            .iter()
            .rev()
            .find(|drop| drop.center().distance(press.at) < COLLECT_RADIUS)
        {
            out.push(Command::CollectResource { drop: drop.id });
            return;
        }

        let Some(selection) = press.selection else {
            return;
        };
        let Some(cell) = CellCoord::containing(press.at) else {
            return;
        };

        match selection {
            Selection::RemovalTool => {
                if occupied(cell) {
                    out.push(Command::RemoveUnit { cell });
                }
            }
            Selection::Unit(kind) => {
                if !occupied(cell) {
                    out.push(Command::PlaceUnit { kind, cell });
                }
            }
        }
    }
}
