//! Simulation run lifecycle and the per-tick step scheduler
//!
//! A [`ForestFire`] owns one grid, the wind and density parameters, and a
//! run-scoped RNG that drives every stochastic decision: planting draws,
//! the per-tick visitation shuffle, and the ignition/extinguish rolls of
//! the spread rule. Seeded runs reproduce bit-for-bit.

pub mod spread;

// Re-export public pieces of the spread rule
pub use spread::{extinguish_probability, ignition_probability, EXTINGUISH_WIND_THRESHOLD};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core_types::CellState;
use crate::error::{Result, SimError};
use crate::grid::{count_clusters, ForestGrid};

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// Step counter after the tick.
    pub steps: u64,
    /// Cells still burning after the tick.
    pub burning: usize,
    /// Whether the run has reached quiescence.
    pub is_terminal: bool,
}

/// One forest fire simulation run.
///
/// Created by planting a tree in each cell with probability `density` and
/// setting every tree in column `x = 0` on fire. Each [`step`](Self::step)
/// visits the cells burning at tick start in a freshly shuffled order and
/// applies the spread rule; the run terminates the first time no cell is
/// burning.
pub struct ForestFire {
    grid: ForestGrid,
    /// Step counter; starts at 1 and increments once per completed tick.
    steps: u64,
    wind: f32,
    density: f32,
    running: bool,
    seed: u64,
    rng: ChaCha8Rng,
}

impl ForestFire {
    /// Create a run with a randomly drawn seed.
    pub fn new(width: usize, height: usize, density: f32, wind: f32) -> Result<Self> {
        let seed = rand::rng().random();
        Self::with_seed(width, height, density, wind, seed)
    }

    /// Create a run whose entire stochastic trajectory is determined by
    /// `seed`: identical parameters and seed reproduce identical state
    /// sequences.
    pub fn with_seed(
        width: usize,
        height: usize,
        density: f32,
        wind: f32,
        seed: u64,
    ) -> Result<Self> {
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(SimError::InvalidParameter(format!(
                "density must be in [0, 1], got {density}"
            )));
        }
        if !wind.is_finite() || wind < 0.0 {
            return Err(SimError::InvalidParameter(format!(
                "wind must be a non-negative speed in m/s, got {wind}"
            )));
        }

        let mut grid = ForestGrid::new(width, height)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Bernoulli(density) planting; the x = 0 boundary column is ignited
        for y in 0..height {
            for x in 0..width {
                if rng.random::<f32>() < density {
                    let state = if x == 0 {
                        CellState::OnFire
                    } else {
                        CellState::Fine
                    };
                    let idx = grid.index(x, y);
                    grid.cells[idx] = state;
                }
            }
        }

        debug!(width, height, density, wind, seed, "created forest fire run");

        Ok(ForestFire {
            grid,
            steps: 1,
            wind,
            density,
            running: true,
            seed,
            rng,
        })
    }

    /// Advance the run by one tick.
    ///
    /// Visits every cell burning at tick start in a uniformly random order
    /// (re-shuffled each tick, so no direction of the lattice is favored)
    /// and applies the spread rule to each. Cells ignited mid-tick wait for
    /// the next tick, but their state changes are visible to cells visited
    /// after them. Calling `step` on a terminated run is a no-op.
    pub fn step(&mut self) -> StepResult {
        if !self.running {
            return self.status();
        }

        // Snapshot the burning set as of tick start
        let mut burning: Vec<(usize, usize)> = self
            .grid
            .cells()
            .filter(|&(_, _, state)| state == CellState::OnFire)
            .map(|(x, y, _)| (x, y))
            .collect();
        burning.shuffle(&mut self.rng);

        for (x, y) in burning {
            spread::spread_from(&mut self.grid, x, y, self.wind, &mut self.rng);
        }

        self.steps += 1;

        if !self.grid.has_any(CellState::OnFire) {
            self.running = false;
            debug!(steps = self.steps, "no cell burning, run terminated");
        }

        self.status()
    }

    fn status(&self) -> StepResult {
        StepResult {
            steps: self.steps,
            burning: self.grid.population(CellState::OnFire),
            is_terminal: !self.running,
        }
    }

    /// Number of cells currently in `state`.
    pub fn population(&self, state: CellState) -> usize {
        self.grid.population(state)
    }

    /// Number of maximal 8-connected clusters of cells in `state`.
    pub fn cluster_count(&self, state: CellState) -> usize {
        count_clusters(&self.grid, state)
    }

    /// State of the cell at `(x, y)`.
    pub fn cell_state(&self, x: usize, y: usize) -> Result<CellState> {
        self.grid.get(x, y)
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &ForestGrid {
        &self.grid
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Wind speed in m/s.
    pub fn wind(&self) -> f32 {
        self.wind
    }

    /// Tree planting probability used at initialization.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Step counter; starts at 1 and increments once per completed tick.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Seed that determines this run's stochastic trajectory.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the run is still active (some cell may yet burn).
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_validation() {
        assert!(matches!(
            ForestFire::with_seed(0, 10, 0.5, 10.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 0, 0.5, 10.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 10, 1.5, 10.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 10, -0.1, 10.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 10, f32::NAN, 10.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 10, 0.5, -1.0, 1),
            Err(SimError::InvalidParameter(_))
        ));
        assert!(matches!(
            ForestFire::with_seed(10, 10, 0.5, f32::INFINITY, 1),
            Err(SimError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_full_density_plants_every_cell() {
        let run = ForestFire::with_seed(8, 8, 1.0, 0.0, 42).unwrap();

        assert_eq!(run.population(CellState::Empty), 0);
        // Whole boundary column burns, everything else is Fine
        assert_eq!(run.population(CellState::OnFire), 8);
        assert_eq!(run.population(CellState::Fine), 56);
        for y in 0..8 {
            assert_eq!(run.cell_state(0, y).unwrap(), CellState::OnFire);
        }
    }

    #[test]
    fn test_zero_density_plants_nothing() {
        let mut run = ForestFire::with_seed(8, 8, 0.0, 10.0, 42).unwrap();

        assert_eq!(run.population(CellState::Empty), 64);
        assert!(run.is_running());

        // First tick finds nothing burning and terminates
        let result = run.step();
        assert!(result.is_terminal);
        assert_eq!(result.burning, 0);
        assert_eq!(result.steps, 2);
    }

    #[test]
    fn test_step_counter_starts_at_one() {
        let mut run = ForestFire::with_seed(5, 5, 1.0, 0.0, 7).unwrap();
        assert_eq!(run.steps(), 1);
        run.step();
        assert_eq!(run.steps(), 2);
    }

    #[test]
    fn test_step_after_terminal_is_noop() {
        let mut run = ForestFire::with_seed(5, 5, 1.0, 0.0, 7).unwrap();

        // Wind 0: column 0 burns out in one tick without spreading
        let first = run.step();
        assert!(first.is_terminal);

        let grid_before = run.grid().clone();
        let steps_before = run.steps();
        for _ in 0..3 {
            let again = run.step();
            assert!(again.is_terminal);
            assert_eq!(again.burning, 0);
        }
        assert_eq!(run.steps(), steps_before);
        assert_eq!(*run.grid(), grid_before);
    }

    #[test]
    fn test_out_of_bounds_query() {
        let run = ForestFire::with_seed(5, 5, 1.0, 0.0, 7).unwrap();
        assert!(matches!(
            run.cell_state(5, 5),
            Err(SimError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_new_runs_differ_without_seeding() {
        // Seeds are drawn randomly; two runs sharing one is astronomically
        // unlikely, and the seed is reportable either way.
        let a = ForestFire::new(10, 10, 0.65, 10.0).unwrap();
        let b = ForestFire::new(10, 10, 0.65, 10.0).unwrap();
        assert_ne!(a.seed(), b.seed());
    }
}
