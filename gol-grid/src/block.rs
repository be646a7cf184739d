use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// A half-open rectangle `[start, end)` of the grid; the unit of work
/// handed to a single logic thread inside a worker. The partitioning
/// scheme may split both rows and columns, so a block is a full 2D
/// sub-rectangle, not necessarily a row band.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub start: Cell,
    pub end: Cell,
}

impl Block {
    pub fn new(start: Cell, end: Cell) -> Self {
        Block { start, end }
    }

    pub fn width(&self) -> u32 {
        self.end.x - self.start.x
    }

    pub fn height(&self) -> u32 {
        self.end.y - self.start.y
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.start.x && cell.x < self.end.x && cell.y >= self.start.y && cell.y < self.end.y
    }

    /// A cell is on this block's boundary if shrinking the block by one
    /// cell on every side would exclude it: the outermost ring, whose
    /// neighbors can reach outside the block.
    pub fn is_boundary(&self, cell: Cell) -> bool {
        self.contains(cell)
            && (cell.x == self.start.x
                || cell.x == self.end.x - 1
                || cell.y == self.start.y
                || cell.y == self.end.y - 1)
    }

    /// The interior cells whose eight neighbors are guaranteed to stay
    /// inside this block: empty whenever the block is 2 or fewer cells
    /// wide or tall.
    pub fn interior(&self) -> impl Iterator<Item = Cell> + '_ {
        let xs = if self.width() > 2 {
            (self.start.x + 1)..(self.end.x - 1)
        } else {
            self.start.x..self.start.x
        };
        let ys = if self.height() > 2 {
            (self.start.y + 1)..(self.end.y - 1)
        } else {
            self.start.y..self.start.y
        };
        ys.flat_map(move |y| xs.clone().map(move |x| Cell::new(x, y)))
    }

    /// Every cell of this block, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.start.y..self.end.y)
            .flat_map(move |y| (self.start.x..self.end.x).map(move |x| Cell::new(x, y)))
    }
}

/// An ordered set of non-overlapping [`Block`]s that together cover every
/// cell of the grid exactly once.
pub type Partition = Vec<Block>;

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_interior_excludes_boundary_ring() {
        let b = Block::new(Cell::new(0, 0), Cell::new(5, 5));
        let interior: Vec<Cell> = b.interior().collect();
        assert_eq!(interior.len(), 9);
        assert!(interior.contains(&Cell::new(2, 2)));
        assert!(!interior.contains(&Cell::new(0, 0)));
        assert!(!interior.contains(&Cell::new(4, 4)));
    }

    #[test]
    fn test_interior_empty_for_thin_block() {
        let b = Block::new(Cell::new(0, 0), Cell::new(10, 2));
        assert_eq!(b.interior().count(), 0);
    }

    #[test]
    fn test_is_boundary() {
        let b = Block::new(Cell::new(2, 2), Cell::new(6, 6));
        assert!(b.is_boundary(Cell::new(2, 3)));
        assert!(b.is_boundary(Cell::new(5, 5)));
        assert!(!b.is_boundary(Cell::new(3, 3)));
        assert!(!b.is_boundary(Cell::new(10, 10)));
    }

    #[test]
    fn test_cells_count_matches_area() {
        let b = Block::new(Cell::new(1, 1), Cell::new(4, 6));
        assert_eq!(b.cells().count(), 3 * 5);
    }
}
