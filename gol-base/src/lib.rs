mod error;
mod kind;
mod worker_mask;

pub use error::{err, Error, Result};
pub use kind::GolError;
pub use worker_mask::WorkerMask;
