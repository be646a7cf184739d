use gol_grid::Cell;

/// The controller's own copy of the grid, kept in sync from the broker's
/// `Flipped`/`TurnComplete` event stream rather than owning any evaluation
/// logic of its own.
///
/// Flips land in `pixels` the instant they arrive so a final PGM snapshot
/// is always exact; `alive_count`, which only feeds the periodic display
/// timer, is deliberately refreshed at `commit_turn` rather than on every
/// flip, so a tick never reports a mid-turn count.
pub struct GridMirror {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    alive_count: usize,
    pending_delta: i64,
}

const ALIVE: u8 = 255;
const DEAD: u8 = 0;

impl GridMirror {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize));
        let alive_count = pixels.iter().filter(|&&p| p == ALIVE).count();
        GridMirror {
            width,
            height,
            pixels,
            alive_count,
            pending_delta: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The alive count as of the last committed turn.
    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    fn index(&self, cell: Cell) -> usize {
        (cell.y as usize) * (self.width as usize) + (cell.x as usize)
    }

    pub fn apply_flip(&mut self, cell: Cell) {
        let idx = self.index(cell);
        let now_alive = self.pixels[idx] != ALIVE;
        self.pixels[idx] = if now_alive { ALIVE } else { DEAD };
        self.pending_delta += if now_alive { 1 } else { -1 };
    }

    pub fn commit_turn(&mut self) {
        self.alive_count = (self.alive_count as i64 + self.pending_delta) as usize;
        self.pending_delta = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_initial_alive_count() {
        let mirror = GridMirror::new(2, 2, vec![0, 255, 0, 255]);
        assert_eq!(mirror.alive_count(), 2);
    }

    #[test]
    fn test_flip_does_not_change_alive_count_until_commit() {
        let mut mirror = GridMirror::new(2, 2, vec![0, 0, 0, 0]);
        mirror.apply_flip(Cell::new(0, 0));
        assert_eq!(mirror.alive_count(), 0);
        mirror.commit_turn();
        assert_eq!(mirror.alive_count(), 1);
    }

    #[test]
    fn test_flip_back_and_forth_in_one_turn_nets_to_zero_delta() {
        let mut mirror = GridMirror::new(2, 2, vec![0, 0, 0, 0]);
        mirror.apply_flip(Cell::new(0, 0));
        mirror.apply_flip(Cell::new(0, 0));
        mirror.commit_turn();
        assert_eq!(mirror.alive_count(), 0);
        assert!(!mirror.pixels().iter().any(|&p| p == ALIVE));
    }
}
