use gol_grid::{Adjustment, Cell, ExchangeGraph, Matrix};

/// Apply every cell a worker reported as flipped to the authoritative
/// `matrix`, and for each flip that crosses a partition boundary (per
/// `graph`), record the increment/decrement the owning worker(s) need
/// applied to their own surrounding counts next turn.
///
/// Called once per worker's flipped list per turn; `adjustments` is
/// shared and accumulated across all workers' calls within the same
/// turn, then drained into that turn's `Worker.Next` calls and cleared.
pub fn apply_flips_and_accumulate_adjustments(
    matrix: &mut Matrix,
    graph: &ExchangeGraph,
    flipped: &[Cell],
    adjustments: &mut [Adjustment],
) {
    for &cell in flipped {
        let now_alive = matrix.flip(cell);
        let targets = graph.mask(cell);
        if targets.is_empty() {
            continue;
        }
        for worker in targets.iter() {
            adjustments[worker].push(cell, now_alive);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::Cell;
    use test_log::test;

    #[test]
    fn test_flip_with_no_exchange_targets_touches_no_adjustment() {
        let mut matrix = Matrix::new(4, 4);
        let graph = ExchangeGraph::new(4, 4);
        let mut adjustments = vec![Adjustment::new(), Adjustment::new()];
        apply_flips_and_accumulate_adjustments(
            &mut matrix,
            &graph,
            &[Cell::new(1, 1)],
            &mut adjustments,
        );
        assert!(matrix.is_alive(Cell::new(1, 1)));
        assert!(adjustments.iter().all(Adjustment::is_empty));
    }

    #[test]
    fn test_flip_with_exchange_target_routes_by_new_state() {
        let mut matrix = Matrix::new(4, 4);
        let mut graph = ExchangeGraph::new(4, 4);
        graph.mark(Cell::new(1, 1), 1);
        let mut adjustments = vec![Adjustment::new(), Adjustment::new()];

        apply_flips_and_accumulate_adjustments(
            &mut matrix,
            &graph,
            &[Cell::new(1, 1)],
            &mut adjustments,
        );
        assert_eq!(adjustments[1].increment, vec![Cell::new(1, 1)]);
        assert!(adjustments[0].is_empty());

        apply_flips_and_accumulate_adjustments(
            &mut matrix,
            &graph,
            &[Cell::new(1, 1)],
            &mut adjustments,
        );
        assert_eq!(adjustments[1].decrement, vec![Cell::new(1, 1)]);
    }
}
