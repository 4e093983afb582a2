//! Fixed-size 2D tree lattice with Moore adjacency
//!
//! Cell states are stored densely in row-major order. Adjacency is the
//! 8-neighbor Moore neighborhood clipped at the boundary: no wraparound,
//! so edge and corner cells have fewer than eight neighbors.

use serde::{Deserialize, Serialize};

use crate::core_types::CellState;
use crate::error::{Result, SimError};

/// Moore neighborhood offsets (Chebyshev distance 1).
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Dense 2D lattice of cell states.
///
/// Owns all authoritative cell state for a run. Every in-range coordinate
/// maps to exactly one state; out-of-range access is an error, never
/// silently clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestGrid {
    width: usize,
    height: usize,
    /// Cell states in row-major order: `[y * width + x]`
    pub(crate) cells: Vec<CellState>,
}

impl ForestGrid {
    /// Create a grid with every cell `Empty`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidParameter(format!(
                "grid dimensions must be positive, got {width}x{height}"
            )));
        }

        Ok(ForestGrid {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell index from (x, y) coordinates
    #[inline]
    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.index(x, y))
        } else {
            Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// State of the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the state of the cell at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Moore neighbors of an in-range cell as `(x, y, state)` tuples.
    ///
    /// Internal variant without the bounds check; callers guarantee the
    /// center coordinate is in range. States are captured eagerly, so the
    /// returned iterator holds no borrow of the grid.
    pub(crate) fn moore_neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> impl Iterator<Item = (usize, usize, CellState)> {
        debug_assert!(x < self.width && y < self.height);

        let mut out = [(0usize, 0usize, CellState::Empty); 8];
        let mut n = 0;
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx >= 0 && ny >= 0 && (nx as usize) < self.width && (ny as usize) < self.height {
                let (nx, ny) = (nx as usize, ny as usize);
                out[n] = (nx, ny, self.cells[self.index(nx, ny)]);
                n += 1;
            }
        }
        out.into_iter().take(n)
    }

    /// Moore neighbors of the cell at `(x, y)` as `(x, y, state)` tuples.
    pub fn neighbors(
        &self,
        x: usize,
        y: usize,
    ) -> Result<impl Iterator<Item = (usize, usize, CellState)>> {
        self.checked_index(x, y)?;
        Ok(self.moore_neighbors(x, y))
    }

    /// All cells as `(x, y, state)` tuples in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &state)| (idx % width, idx / width, state))
    }

    /// All occupied cells as `(x, y, state)` tuples in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        self.cells().filter(|&(_, _, state)| state.is_occupied())
    }

    /// Number of cells currently in `state`.
    pub fn population(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Whether any cell is currently in `state`.
    pub fn has_any(&self, state: CellState) -> bool {
        self.cells.contains(&state)
    }
}
