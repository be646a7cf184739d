use crate::block::Partition;
use gol_base::{GolError, Result};
use serde::{Deserialize, Serialize};

/// Parameters the controller hands the broker at `Init`, and the broker
/// persists for the lifetime of the session (needed again on recovery, to
/// re-partition against the surviving workers).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BrokerParams {
    pub turns: u32,
    pub threads: u32,
    pub image_width: u32,
    pub image_height: u32,
    /// The initial grid, exactly one of a bit-packed full plane or a list
    /// of alive-coordinate bytes -- whichever the controller found smaller.
    pub initial_pixels: InitialPixels,
}

/// The two wire encodings a session's starting grid may arrive in. The
/// codec crate is responsible for choosing between them and for turning
/// either variant into a `Matrix`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum InitialPixels {
    BitPacked(Vec<u8>),
    Coordinates(Vec<u8>),
}

impl BrokerParams {
    pub fn validate(&self) -> Result<()> {
        if self.turns == 0 {
            return Err(err_invalid("turns must be non-zero"));
        }
        if self.threads == 0 {
            return Err(err_invalid("threads must be non-zero"));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(err_invalid("image dimensions must be non-zero"));
        }
        Ok(())
    }
}

fn err_invalid(msg: &'static str) -> gol_base::Error {
    GolError::InvalidParams(msg.to_string()).into()
}

/// What the broker sends a single worker at `Worker.Init`: its slice of the
/// overall partition, plus the subset of the initial grid it needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerParams {
    pub turns: u32,
    pub image_width: u32,
    pub image_height: u32,
    pub partition: Partition,
    pub pixels: Vec<u8>,
}

/// A worker's identity as the broker's node registry knows it: the address
/// to dial for RPCs, and whether it is currently believed reachable.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub addr: String,
    pub alive: bool,
}

impl Node {
    pub fn new(addr: impl Into<String>) -> Self {
        Node {
            addr: addr.into(),
            alive: true,
        }
    }
}
