use crate::logic::evaluate_block;
use crate::matrix::WorkerMatrix;
use gol_base::Result;
use gol_codec::encode_coords;
use gol_grid::{size_int_bytes, Adjustment, Cell, Partition, WorkerParams};
use tracing::info;

/// A worker's session state between `Init` and the next `Init`/`Kill`.
/// Holds the authoritative ("current") and scratch ("next") matrix planes,
/// swapped at the end of every turn.
pub struct Worker {
    partition: Partition,
    current: WorkerMatrix,
    next: WorkerMatrix,
    size_int: u8,
}

impl Worker {
    pub fn init(wp: WorkerParams) -> Self {
        info!(
            turns = wp.turns,
            width = wp.image_width,
            height = wp.image_height,
            blocks = wp.partition.len(),
            "worker init"
        );
        let current = WorkerMatrix::from_pixels(wp.image_width, wp.image_height, wp.pixels);
        let next = current.empty_like();
        let size_int = size_int_bytes(wp.image_width.max(wp.image_height));
        Worker {
            partition: wp.partition,
            current,
            next,
            size_int,
        }
    }

    /// Evaluate one turn, fanning out one thread per block in the
    /// partition. Returns the packed coordinates of every cell this
    /// worker flipped this turn, ready to be forwarded to the broker.
    pub fn next_turn(&mut self, adjustment: &Adjustment) -> Result<Vec<u8>> {
        self.current.apply_adjustment(adjustment, &self.partition);
        self.current.seed(&mut self.next);

        let results = std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .partition
                .iter()
                .map(|block| scope.spawn(|| evaluate_block(&self.current, block)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("logic thread panicked"))
                .collect::<Vec<_>>()
        });

        let mut flipped: Vec<Cell> = Vec::new();
        let mut unsafe_flipped: Vec<Cell> = Vec::new();
        for result in &results {
            flipped.extend(result.flipped.iter().copied());
            unsafe_flipped.extend(result.unsafe_flipped.iter().copied());
            for &(cell, delta) in &result.safe_deltas {
                self.next.adjust_surrounding_count(cell, delta);
            }
        }
        for &cell in &flipped {
            let alive_next = !self.current.is_alive(cell);
            self.next.set_pixel(cell, alive_next);
        }
        for &cell in &unsafe_flipped {
            self.current
                .update_unsafe(cell, &mut self.next, &self.partition);
        }

        std::mem::swap(&mut self.current, &mut self.next);
        Ok(encode_coords(&flipped, self.size_int))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::{Block, Cell};
    use test_log::test;

    fn blinker_params() -> WorkerParams {
        let mut pixels = vec![0u8; 25];
        for x in 1..4 {
            pixels[2 * 5 + x] = 255;
        }
        WorkerParams {
            turns: 2,
            image_width: 5,
            image_height: 5,
            partition: vec![Block::new(Cell::new(0, 0), Cell::new(5, 5))],
            pixels,
        }
    }

    #[test]
    fn test_blinker_oscillates_across_two_turns() {
        let mut worker = Worker::init(blinker_params());
        let empty = Adjustment::new();

        let turn1 = worker.next_turn(&empty).unwrap();
        assert!(!turn1.is_empty());
        assert!(worker.current.is_alive(Cell::new(2, 1)));
        assert!(!worker.current.is_alive(Cell::new(1, 2)));

        let turn2 = worker.next_turn(&empty).unwrap();
        assert!(!turn2.is_empty());
        assert!(worker.current.is_alive(Cell::new(1, 2)));
        assert!(!worker.current.is_alive(Cell::new(2, 1)));
    }

    #[test]
    fn test_still_life_produces_no_flips() {
        let mut pixels = vec![0u8; 64];
        for (x, y) in [(3, 3), (4, 3), (3, 4), (4, 4)] {
            pixels[y * 8 + x] = 255;
        }
        let wp = WorkerParams {
            turns: 1,
            image_width: 8,
            image_height: 8,
            partition: vec![Block::new(Cell::new(0, 0), Cell::new(8, 8))],
            pixels,
        };
        let mut worker = Worker::init(wp);
        let turn = worker.next_turn(&Adjustment::new()).unwrap();
        assert!(turn.is_empty());
    }
}
