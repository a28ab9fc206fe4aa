//! Declarative per-frame scene descriptors.

use glam::Vec2;
use lane_defence_core::{AttackerKind, CellCoord, UnitBehavior};

/// Frames after which a drop starts flickering to signal its expiry.
const FLICKER_AFTER: u64 = 600;

/// Everything drawn on a single frame, back to front.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Highlight of the hovered cell while an action is selected.
    pub hover: Option<HoverHighlight>,
    /// Placed units.
    pub units: Vec<UnitPresentation>,
    /// Attackers on the field.
    pub attackers: Vec<AttackerPresentation>,
    /// Centre points of projectiles in flight.
    pub projectiles: Vec<Vec2>,
    /// Resource drops awaiting collection.
    pub drops: Vec<DropPresentation>,
}

/// Highlighted cell under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverHighlight {
    /// Cell under the pointer.
    pub cell: CellCoord,
    /// How the highlight is tinted.
    pub style: HoverStyle,
}

/// Tint applied to the hovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverStyle {
    /// A unit type is selected.
    Place,
    /// The removal tool hovers an occupied cell.
    RemoveTarget,
    /// The removal tool hovers an empty cell.
    RemoveEmpty,
}

/// Placed unit as drawn on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitPresentation {
    /// Cell the unit occupies.
    pub cell: CellCoord,
    /// Behaviour, including consumer state.
    pub behavior: UnitBehavior,
    /// Remaining health as a fraction of the starting health.
    pub health_ratio: f32,
}

/// Attacker as drawn on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerPresentation {
    /// Upper-left corner of the attacker's bounds.
    pub position: Vec2,
    /// Sub-type of the attacker.
    pub kind: AttackerKind,
    /// Remaining health.
    pub health: f32,
}

/// Resource drop as drawn on the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropPresentation {
    /// Upper-left corner of the drop's bounds.
    pub position: Vec2,
    /// Opacity in the range 0.0..=1.0.
    pub opacity: f32,
}

impl DropPresentation {
    /// Describes a drop of the provided age, flickering once it nears expiry.
    #[must_use]
    pub fn new(position: Vec2, life: u64) -> Self {
        let opacity = if life > FLICKER_AFTER {
            0.5 + 0.5 * ((life - FLICKER_AFTER) as f32 * 0.2).sin()
        } else {
            1.0
        };
        Self { position, opacity }
    }
}
