use crate::cell::Cell;
use serde::{Deserialize, Serialize};

/// The set of surrounding-count adjustments a worker owes its peers for the
/// turn it just computed: cells it flipped to alive need `+1` applied by
/// whichever neighbor worker owns the count, cells it flipped to dead need
/// `-1`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Adjustment {
    pub increment: Vec<Cell>,
    pub decrement: Vec<Cell>,
}

impl Adjustment {
    pub fn new() -> Self {
        Adjustment::default()
    }

    pub fn is_empty(&self) -> bool {
        self.increment.is_empty() && self.decrement.is_empty()
    }

    pub fn push(&mut self, cell: Cell, now_alive: bool) {
        if now_alive {
            self.increment.push(cell);
        } else {
            self.decrement.push(cell);
        }
    }
}
