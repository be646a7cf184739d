use crate::matrix::WorkerMatrix;
use gol_grid::{Block, Cell};

/// The outcome of evaluating one turn over a single block: every cell that
/// flipped, the subset of those on the block's unsafe boundary (whose
/// neighbor-count update the worker coordinator must apply afterward), and
/// the neighbor-count deltas owed by *safe*-interior flips, which are
/// confined to cells inside this same block.
#[derive(Debug, Default)]
pub struct BlockResult {
    pub flipped: Vec<Cell>,
    pub unsafe_flipped: Vec<Cell>,
    pub safe_deltas: Vec<(Cell, i8)>,
}

/// The standard Game of Life rule, read off `current`'s pixel/count planes.
fn next_state(current: &WorkerMatrix, cell: Cell) -> bool {
    let alive = current.is_alive(cell);
    let n = current.surrounding_count(cell);
    matches!((alive, n), (true, 2) | (true, 3) | (false, 3))
}

/// Evaluate one turn for a single block, reading only from `current`. Safe
/// interior cells (whose neighbors stay inside the block) have their
/// neighbor-count deltas recorded directly; boundary cells are flagged for
/// the coordinator's deferred cross-block update.
pub fn evaluate_block(current: &WorkerMatrix, block: &Block) -> BlockResult {
    let mut result = BlockResult::default();

    for cell in block.interior() {
        let alive_now = current.is_alive(cell);
        let alive_next = next_state(current, cell);
        if alive_now != alive_next {
            result.flipped.push(cell);
            let delta: i8 = if alive_next { 1 } else { -1 };
            for n in cell.surrounding(current.width(), current.height()) {
                result.safe_deltas.push((n, delta));
            }
        }
    }

    for cell in block.cells().filter(|c| block.is_boundary(*c)) {
        let alive_now = current.is_alive(cell);
        let alive_next = next_state(current, cell);
        if alive_now != alive_next {
            result.flipped.push(cell);
            result.unsafe_flipped.push(cell);
        }
    }

    result
}
