//! Per-cell tree condition

use serde::{Deserialize, Serialize};

/// Condition of a single lattice cell.
///
/// A cell is either unoccupied for the whole run (`Empty`) or holds one tree
/// whose condition evolves through the occupied states. Occupancy is decided
/// once, at planting time, and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// No tree occupies this cell; never transitions.
    Empty,
    /// A healthy, unburned tree.
    Fine,
    /// A tree currently burning.
    OnFire,
    /// A tree fully consumed by fire.
    BurnedOut,
    /// A burning tree whose fire was snuffed by strong wind.
    FirePutOut,
}

impl CellState {
    /// The four conditions an occupied cell can hold, in reporting order.
    pub const TREE_STATES: [CellState; 4] = [
        CellState::Fine,
        CellState::OnFire,
        CellState::BurnedOut,
        CellState::FirePutOut,
    ];

    /// Whether a tree occupies the cell.
    pub fn is_occupied(self) -> bool {
        self != CellState::Empty
    }

    /// Column label used in exported data tables.
    pub fn label(self) -> &'static str {
        match self {
            CellState::Empty => "Empty",
            CellState::Fine => "Fine",
            CellState::OnFire => "On Fire",
            CellState::BurnedOut => "Burned Out",
            CellState::FirePutOut => "Fire Put Out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_empty_is_unoccupied() {
        assert!(!CellState::Empty.is_occupied());
        for state in CellState::TREE_STATES {
            assert!(state.is_occupied());
        }
    }

    #[test]
    fn labels_match_reporting_columns() {
        assert_eq!(CellState::OnFire.label(), "On Fire");
        assert_eq!(CellState::FirePutOut.label(), "Fire Put Out");
    }
}
