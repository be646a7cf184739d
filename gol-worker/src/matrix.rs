use gol_grid::{Adjustment, Cell, Partition};

/// A worker's local view of the grid: a full-size pixel and
/// surrounding-count plane, of which only the cells inside the worker's
/// assigned [`Partition`] are ever read or written.
///
/// The distilled source keeps a ragged `[][]uint8` with unpopulated rows
/// outside the partition; a flat plane is simpler here and the unused
/// cells cost only a few zeroed bytes, never touched by any logic thread.
#[derive(Clone, Debug)]
pub struct WorkerMatrix {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    surrounding_counts: Vec<i8>,
}

impl WorkerMatrix {
    /// Build from a pixel plane already decoded by the broker, computing
    /// surrounding counts fresh. Used once, at `Worker.Init`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let mut m = WorkerMatrix {
            width,
            height,
            pixels,
            surrounding_counts: vec![0; (width as usize) * (height as usize)],
        };
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                let count = cell
                    .surrounding(width, height)
                    .iter()
                    .filter(|&&n| m.is_alive(n))
                    .count() as i8;
                let idx = m.index(cell);
                m.surrounding_counts[idx] = count;
            }
        }
        m
    }

    pub fn empty_like(&self) -> Self {
        let len = (self.width as usize) * (self.height as usize);
        WorkerMatrix {
            width: self.width,
            height: self.height,
            pixels: vec![0; len],
            surrounding_counts: vec![0; len],
        }
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y as usize) * (self.width as usize) + (cell.x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_alive(&self, cell: Cell) -> bool {
        self.pixels[self.index(cell)] != 0
    }

    pub fn surrounding_count(&self, cell: Cell) -> i8 {
        self.surrounding_counts[self.index(cell)]
    }

    pub fn set_pixel(&mut self, cell: Cell, alive: bool) {
        let idx = self.index(cell);
        self.pixels[idx] = if alive { 255 } else { 0 };
    }

    pub fn set_surrounding_count(&mut self, cell: Cell, count: i8) {
        let idx = self.index(cell);
        self.surrounding_counts[idx] = count;
    }

    pub fn adjust_surrounding_count(&mut self, cell: Cell, delta: i8) {
        let idx = self.index(cell);
        self.surrounding_counts[idx] += delta;
    }

    pub fn in_partition(cell: Cell, partition: &Partition) -> bool {
        partition.iter().any(|b| b.contains(cell))
    }

    /// Clone the current plane into `next` as the seed for this turn's
    /// computation: cells not touched by any flip keep their current
    /// pixel and count exactly.
    pub fn seed(&self, next: &mut WorkerMatrix) {
        next.pixels.copy_from_slice(&self.pixels);
        next.surrounding_counts.copy_from_slice(&self.surrounding_counts);
    }

    /// Apply surrounding-count adjustments received from the broker for
    /// flips in *other* workers' partitions: only neighbors inside this
    /// worker's own partition are touched.
    pub fn apply_adjustment(&mut self, adjustment: &Adjustment, partition: &Partition) {
        for &cell in &adjustment.increment {
            for n in cell.surrounding(self.width, self.height) {
                if Self::in_partition(n, partition) {
                    self.adjust_surrounding_count(n, 1);
                }
            }
        }
        for &cell in &adjustment.decrement {
            for n in cell.surrounding(self.width, self.height) {
                if Self::in_partition(n, partition) {
                    self.adjust_surrounding_count(n, -1);
                }
            }
        }
    }

    /// Deferred surrounding-count update for a cell flipped at an unsafe
    /// (block-edge) boundary: `self` is read in its *pre-flip* state to
    /// decide the adjustment direction, and only neighbors inside this
    /// worker's own partition are updated in `next`.
    pub fn update_unsafe(&self, cell: Cell, next: &mut WorkerMatrix, partition: &Partition) {
        let was_alive = self.is_alive(cell);
        let delta: i8 = if was_alive { -1 } else { 1 };
        for n in cell.surrounding(self.width, self.height) {
            if Self::in_partition(n, partition) {
                next.adjust_surrounding_count(n, delta);
            }
        }
    }
}
