//! Stochastic cell transition rule
//!
//! Applies to burning cells only. Strong wind can snuff a fire before it
//! spreads (turbulence), while any wind magnitude scales the contagion
//! probability to neighboring trees linearly. Cells that reach `BurnedOut`
//! or `FirePutOut` are absorbing and never re-examined.

use rand::Rng;

use crate::core_types::CellState;
use crate::grid::ForestGrid;

/// Wind speed (m/s) at or above which a burning tree may self-extinguish.
pub const EXTINGUISH_WIND_THRESHOLD: f32 = 40.0;

/// Probability that a burning cell self-extinguishes this tick.
///
/// Zero below 40 m/s, then rising linearly to certainty at 80 m/s. Wind
/// beyond that range saturates at probability 1 rather than erroring.
pub fn extinguish_probability(wind: f32) -> f32 {
    if wind < EXTINGUISH_WIND_THRESHOLD {
        0.0
    } else {
        ((wind - 40.0) / 40.0).clamp(0.0, 1.0)
    }
}

/// Probability that a burning cell ignites one `Fine` neighbor.
///
/// Linear in wind speed, saturating at 50 m/s.
pub fn ignition_probability(wind: f32) -> f32 {
    (wind / 50.0).clamp(0.0, 1.0)
}

/// Apply the transition rule to the cell at `(x, y)`.
///
/// Cells in any state other than `OnFire` are left untouched. A burning
/// cell first rolls the wind self-extinguish branch; if that fires, the
/// cell becomes `FirePutOut` and does not ignite anyone this tick.
/// Otherwise each `Fine` Moore neighbor is ignited independently with the
/// wind-scaled contagion probability, and the cell burns out.
///
/// Neighbor mutations are applied immediately, so cells evaluated later in
/// the same tick observe them.
pub(crate) fn spread_from<R: Rng>(
    grid: &mut ForestGrid,
    x: usize,
    y: usize,
    wind: f32,
    rng: &mut R,
) {
    let idx = grid.index(x, y);
    if grid.cells[idx] != CellState::OnFire {
        return;
    }

    if wind >= EXTINGUISH_WIND_THRESHOLD && rng.random::<f32>() < extinguish_probability(wind) {
        grid.cells[idx] = CellState::FirePutOut;
        return;
    }

    ignite_neighbors(grid, x, y, wind, rng);
    grid.cells[idx] = CellState::BurnedOut;
}

/// Roll ignition for every `Fine` Moore neighbor of `(x, y)`.
pub(crate) fn ignite_neighbors<R: Rng>(
    grid: &mut ForestGrid,
    x: usize,
    y: usize,
    wind: f32,
    rng: &mut R,
) {
    let p_ignite = ignition_probability(wind);
    let neighbors: Vec<(usize, usize, CellState)> = grid.moore_neighbors(x, y).collect();
    for (nx, ny, state) in neighbors {
        if state == CellState::Fine && rng.random::<f32>() < p_ignite {
            let nidx = grid.index(nx, ny);
            grid.cells[nidx] = CellState::OnFire;
        }
    }
}
