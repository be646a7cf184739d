use std::net::{TcpListener, TcpStream};
use std::sync::{Condvar, Mutex};

use tracing::{info, warn};

/// Holds the single live connection from the local controller, if any.
/// `Init` blocks on this until a controller has dialed in; the acceptor
/// thread below is the only writer.
pub struct ControllerConnSlot {
    slot: Mutex<Option<TcpStream>>,
    signal: Condvar,
}

impl ControllerConnSlot {
    pub fn new() -> Self {
        ControllerConnSlot {
            slot: Mutex::new(None),
            signal: Condvar::new(),
        }
    }

    fn set(&self, stream: TcpStream) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(stream);
        self.signal.notify_all();
    }

    /// Block until a controller connection is available, then take and
    /// return it exclusively to the caller (normally the session driver,
    /// for the lifetime of one session).
    pub fn take_or_wait(&self) -> TcpStream {
        let mut slot = self.slot.lock().unwrap();
        loop {
            if let Some(stream) = slot.take() {
                return stream;
            }
            slot = self.signal.wait(slot).unwrap();
        }
    }
}

impl Default for ControllerConnSlot {
    fn default() -> Self {
        ControllerConnSlot::new()
    }
}

/// Accept controller connections forever, replacing whatever connection
/// was previously held. Mirrors the distilled source's single-listener,
/// single-slot model: there is one controller per broker session.
pub fn serve_controller_connections(listener: TcpListener, slot: &ControllerConnSlot) {
    for incoming in listener.incoming() {
        match incoming {
            Ok(stream) => {
                info!(
                    peer = %stream.peer_addr().map(|a| a.to_string()).unwrap_or_default(),
                    "controller connected"
                );
                slot.set(stream);
            }
            Err(e) => warn!("controller accept failed: {e}"),
        }
    }
}
