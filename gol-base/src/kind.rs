use std::fmt;

/// Domain-specific error kinds, layered on top of the generic backtraced
/// [`crate::Error`] via the blanket `From<E: std::error::Error>` impl.
///
/// Matching on `GolError` lets callers distinguish recoverable conditions
/// (a failed worker RPC, which the broker turns into recovery) from fatal
/// ones (a malformed frame, a PGM mismatch) without downcasting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GolError {
    /// No workers are registered at `Init` or at the start of recovery.
    NoWorkers,
    /// A `Worker.Init` or `Worker.Next` RPC failed during a session.
    WorkerRpcFailure { worker: usize },
    /// A malformed message was read from a broker<->controller or
    /// broker<->worker stream.
    WireFraming(String),
    /// A PGM read/write failure on the controller side.
    Io(String),
    /// `Init` was called with parameters that can never produce a valid
    /// session (zero threads, zero turns, more workers than the exchange
    /// mask can address, ...).
    InvalidParams(String),
}

impl fmt::Display for GolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GolError::NoWorkers => write!(f, "no worker nodes available"),
            GolError::WorkerRpcFailure { worker } => {
                write!(f, "rpc to worker {worker} failed")
            }
            GolError::WireFraming(msg) => write!(f, "wire framing error: {msg}"),
            GolError::Io(msg) => write!(f, "io error: {msg}"),
            GolError::InvalidParams(msg) => write!(f, "invalid params: {msg}"),
        }
    }
}

impl std::error::Error for GolError {}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_display() {
        assert_eq!(GolError::NoWorkers.to_string(), "no worker nodes available");
        assert_eq!(
            GolError::WorkerRpcFailure { worker: 3 }.to_string(),
            "rpc to worker 3 failed"
        );
    }

    #[test]
    fn test_into_base_error() {
        let _e: crate::Error = GolError::NoWorkers.into();
    }
}
