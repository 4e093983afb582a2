//! Connected-component counting over same-state cells
//!
//! A cluster is a maximal set of cells sharing a target state that is
//! connected under Moore (8-neighbor) adjacency. Clusters are ephemeral:
//! every query recomputes them from the current grid.

use crate::core_types::CellState;
use crate::grid::ForestGrid;

/// Count maximal 8-connected groups of cells in `target` state.
///
/// Read-only, deterministic pass over the grid: iterative flood fill with an
/// explicit stack and a visited bitmap over the row-major index space. Zero
/// matching cells yields zero clusters.
pub fn count_clusters(grid: &ForestGrid, target: CellState) -> usize {
    let width = grid.width();
    let total = width * grid.height();

    let mut visited = vec![false; total];
    let mut stack: Vec<usize> = Vec::new();
    let mut clusters = 0;

    for start in 0..total {
        if visited[start] || grid.cells[start] != target {
            continue;
        }

        // Unvisited seed cell: flood its whole component.
        clusters += 1;
        visited[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % width, idx / width);
            for (nx, ny, state) in grid.moore_neighbors(x, y) {
                let nidx = grid.index(nx, ny);
                if !visited[nidx] && state == target {
                    visited[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
    }

    clusters
}
