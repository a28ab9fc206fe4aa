#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The engine submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! and the host to react to. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Number of lanes (grid rows) on the field.
pub const GRID_ROWS: u32 = 5;
/// Number of grid columns on the field.
pub const GRID_COLUMNS: u32 = 9;
/// Side length of a single square cell in logical units.
pub const CELL_SIZE: f32 = 80.0;
/// Width of the field in logical units.
pub const FIELD_WIDTH: f32 = GRID_COLUMNS as f32 * CELL_SIZE;
/// Height of the field in logical units.
pub const FIELD_HEIGHT: f32 = GRID_ROWS as f32 * CELL_SIZE;
/// Number of simulation frames that make up one second of play.
pub const FRAMES_PER_SECOND: u64 = 60;

/// Edge length of a projectile's square bounds.
pub const PROJECTILE_SIZE: f32 = 10.0;
/// Edge length of a resource drop's square bounds.
pub const DROP_SIZE: f32 = 30.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Clears every collection and restores the run to its initial state.
    ResetRun,
    /// Advances the authoritative frame counter by one.
    AdvanceFrame,
    /// Marks the one-time wave as started.
    BeginWave,
    /// Places a new attacker at the far edge of the provided lane.
    SpawnAttacker {
        /// Lane the attacker advances along.
        row: u32,
        /// Sub-type of the attacker.
        kind: AttackerKind,
        /// Units travelled per frame while unblocked.
        speed: f32,
    },
    /// Drops a collectible resource from above the field.
    DropResource {
        /// Horizontal position of the drop's left edge.
        x: f32,
        /// Height at which the drop stops falling.
        resting_y: f32,
    },
    /// Runs the per-entity update, collision, and cleanup passes for the frame.
    ResolveFrame,
    /// Converts a resource drop into spendable resources.
    CollectResource {
        /// Identifier of the drop being collected.
        drop: DropId,
    },
    /// Requests placement of a unit in the provided cell.
    PlaceUnit {
        /// Type of unit to construct.
        kind: UnitKind,
        /// Cell the unit occupies.
        cell: CellCoord,
    },
    /// Requests removal of whichever unit occupies the provided cell.
    RemoveUnit {
        /// Cell targeted by the removal tool.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that every collection was cleared and the clock rewound.
    RunReset,
    /// Indicates that the simulation clock advanced.
    FrameAdvanced {
        /// Frame counter after advancing.
        frame: Frame,
    },
    /// Announces that the one-time wave began.
    WaveStarted {
        /// Frame on which the wave fired.
        frame: Frame,
    },
    /// Confirms that an attacker entered the field.
    AttackerSpawned {
        /// Lane the attacker advances along.
        row: u32,
        /// Sub-type assigned to the attacker.
        kind: AttackerKind,
    },
    /// Reports that an attacker ran out of health and was removed.
    AttackerDefeated {
        /// Lane the attacker occupied.
        row: u32,
        /// Sub-type of the defeated attacker.
        kind: AttackerKind,
    },
    /// Reports that a consumer unit eliminated an attacker outright.
    AttackerConsumed {
        /// Cell of the consumer that performed the elimination.
        consumer: CellCoord,
    },
    /// Reports that an attacker crossed the near edge, ending the run.
    AttackerBreached {
        /// Lane the attacker crossed in.
        row: u32,
        /// Frame on which the breach happened.
        frame: Frame,
    },
    /// Confirms that a ranged unit fired a projectile.
    ProjectileFired {
        /// Cell of the unit that fired.
        from: CellCoord,
    },
    /// Confirms that a resource drop appeared.
    ResourceDropped {
        /// Identifier allocated to the drop.
        drop: DropId,
        /// Where the drop originated.
        source: DropSource,
    },
    /// Confirms that a resource drop was collected.
    ResourceCollected {
        /// Identifier of the collected drop.
        drop: DropId,
        /// Value credited to the resource total.
        value: Resources,
    },
    /// Reports the new resource total after any change.
    ResourcesChanged {
        /// Resource total after the change.
        total: Resources,
    },
    /// Confirms that a unit was placed on the field.
    UnitPlaced {
        /// Type of unit that was placed.
        kind: UnitKind,
        /// Cell occupied by the unit.
        cell: CellCoord,
    },
    /// Confirms that the removal tool cleared a unit.
    UnitRemoved {
        /// Type of unit that was removed.
        kind: UnitKind,
        /// Cell the unit previously occupied.
        cell: CellCoord,
    },
    /// Reports that a unit ran out of health and was removed.
    UnitDestroyed {
        /// Type of unit that was destroyed.
        kind: UnitKind,
        /// Cell the unit previously occupied.
        cell: CellCoord,
    },
    /// Reports that a placement request was rejected by the world.
    PlacementRejected {
        /// Type of unit requested for placement.
        kind: UnitKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a removal request targeted an empty cell.
    RemovalRejected {
        /// Cell provided in the removal request.
        cell: CellCoord,
    },
}

/// Authoritative frame counter of a run.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Frame(u64);

impl Frame {
    /// Creates a frame counter with the provided value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric frame value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the frame that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Spendable resource amount.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Resources(u32);

impl Resources {
    /// An empty resource total.
    pub const ZERO: Self = Self(0);

    /// Creates a resource amount from the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds `other`, clamping at the numeric maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts `cost`, returning `None` when the total cannot cover it.
    #[must_use]
    pub const fn checked_sub(self, cost: Self) -> Option<Self> {
        match self.0.checked_sub(cost.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// Placeable defender types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Periodically emits resource drops near itself.
    Producer,
    /// Fires projectiles down its lane while an attacker is ahead.
    Ranged,
    /// High-health blocker with no action.
    Wall,
    /// Eliminates a nearby attacker outright, then rests.
    Consumer,
}

impl UnitKind {
    /// Every placeable unit type in dock order.
    pub const ALL: [UnitKind; 4] = [Self::Producer, Self::Ranged, Self::Wall, Self::Consumer];

    /// Resources required to place the unit.
    #[must_use]
    pub const fn cost(self) -> Resources {
        match self {
            Self::Producer => Resources::new(50),
            Self::Ranged => Resources::new(100),
            Self::Wall => Resources::new(50),
            Self::Consumer => Resources::new(150),
        }
    }

    /// Health the unit starts with.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        match self {
            Self::Producer => 50.0,
            Self::Ranged => 100.0,
            Self::Wall => 400.0,
            Self::Consumer => 100.0,
        }
    }

    /// Behaviour a freshly placed unit of this type starts in.
    #[must_use]
    pub const fn initial_behavior(self) -> UnitBehavior {
        match self {
            Self::Producer => UnitBehavior::Producer,
            Self::Ranged => UnitBehavior::Ranged,
            Self::Wall => UnitBehavior::Wall,
            Self::Consumer => UnitBehavior::Consumer(ConsumerState::Idle),
        }
    }
}

/// Per-type behaviour carried by a placed unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitBehavior {
    /// Resource producer.
    Producer,
    /// Projectile thrower.
    Ranged,
    /// Passive blocker.
    Wall,
    /// Consumer together with its current state.
    Consumer(ConsumerState),
}

impl UnitBehavior {
    /// Unit type that owns this behaviour.
    #[must_use]
    pub const fn kind(&self) -> UnitKind {
        match self {
            Self::Producer => UnitKind::Producer,
            Self::Ranged => UnitKind::Ranged,
            Self::Wall => UnitKind::Wall,
            Self::Consumer(_) => UnitKind::Consumer,
        }
    }
}

/// States of the consumer unit's behaviour cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsumerState {
    /// Scanning its lane for a target.
    Idle,
    /// Resting after an elimination.
    Busy,
}

/// Pending action chosen by the player in the host UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Place a unit of the given type.
    Unit(UnitKind),
    /// Remove whichever unit occupies the clicked cell.
    RemovalTool,
}

impl Selection {
    /// Resources required to use the selection.
    #[must_use]
    pub const fn cost(self) -> Resources {
        match self {
            Self::Unit(kind) => kind.cost(),
            Self::RemovalTool => Resources::ZERO,
        }
    }
}

/// Attacker sub-types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackerKind {
    /// Baseline attacker.
    Standard,
    /// Tougher attacker wearing a cone.
    Armored,
}

impl AttackerKind {
    /// Health the attacker spawns with.
    #[must_use]
    pub const fn base_health(self) -> f32 {
        match self {
            Self::Standard => 100.0,
            Self::Armored => 125.0,
        }
    }
}

/// Origin of a resource drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DropSource {
    /// Fell from above the field on the periodic cadence.
    Sky,
    /// Emitted by a producer unit.
    Producer,
}

/// Unique identifier assigned to a resource drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DropId(u32);

impl DropId {
    /// Creates a new drop identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Snaps a field-local point to the cell containing it.
    ///
    /// Returns `None` when the point lies outside the field.
    #[must_use]
    pub fn containing(point: Vec2) -> Option<Self> {
        if !(0.0..FIELD_WIDTH).contains(&point.x) || !(0.0..FIELD_HEIGHT).contains(&point.y) {
            return None;
        }

        let column = (point.x / CELL_SIZE).floor() as u32;
        let row = (point.y / CELL_SIZE).floor() as u32;
        Some(Self::new(column.min(GRID_COLUMNS - 1), row.min(GRID_ROWS - 1)))
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether the cell lies on the field.
    #[must_use]
    pub const fn is_on_field(&self) -> bool {
        self.column < GRID_COLUMNS && self.row < GRID_ROWS
    }

    /// Upper-left corner of the cell in field units.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.column as f32 * CELL_SIZE, row_y(self.row))
    }
}

/// Vertical field coordinate of a lane's upper edge.
#[must_use]
pub fn row_y(row: u32) -> f32 {
    row as f32 * CELL_SIZE
}

/// Immutable representation of a placed unit used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitSnapshot {
    /// Cell occupied by the unit.
    pub cell: CellCoord,
    /// Behaviour, including the consumer state where relevant.
    pub behavior: UnitBehavior,
    /// Remaining health.
    pub health: f32,
    /// Health the unit was placed with.
    pub max_health: f32,
    /// Frames since placement or the last state transition.
    pub age: u64,
}

/// Immutable representation of an attacker used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackerSnapshot {
    /// Upper-left corner of the attacker's bounds.
    pub position: Vec2,
    /// Lane the attacker advances along.
    pub row: u32,
    /// Sub-type of the attacker.
    pub kind: AttackerKind,
    /// Remaining health.
    pub health: f32,
    /// Units travelled per frame while unblocked.
    pub speed: f32,
    /// Distance actually travelled on the last frame; zero while blocked.
    pub movement: f32,
}

/// Immutable representation of a projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Upper-left corner of the projectile's bounds.
    pub position: Vec2,
    /// Units travelled per frame.
    pub speed: f32,
    /// Damage applied on impact.
    pub power: f32,
    /// Whether the projectile is flagged for removal at cleanup.
    pub spent: bool,
}

/// Immutable representation of a resource drop used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropSnapshot {
    /// Identifier allocated to the drop.
    pub id: DropId,
    /// Upper-left corner of the drop's bounds.
    pub position: Vec2,
    /// Height at which the drop stops falling.
    pub resting_y: f32,
    /// Resources credited on collection.
    pub value: Resources,
    /// Frames the drop has existed.
    pub life: u64,
    /// Where the drop originated.
    pub source: DropSource,
}

impl DropSnapshot {
    /// Visual centre of the drop used for pointer hit testing.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(DROP_SIZE * 0.5)
    }
}

/// Reasons a placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies outside the field.
    OutOfBounds,
    /// Another unit already occupies the cell.
    Occupied,
    /// The resource total cannot cover the unit's cost.
    InsufficientResources,
}
