use std::collections::BTreeMap;
use std::io::{BufRead, BufReader};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

/// Worker nodes currently registered with the broker, keyed by an
/// internal registration id (not the same as a partitioning round's
/// worker index, which is assigned fresh by `assign_to_nodes` every
/// `Init`/recovery). Guarded by a single mutex; reads take a snapshot
/// rather than holding the lock across RPC dispatch.
pub struct NodeRegistry {
    next_id: AtomicU64,
    nodes: Mutex<BTreeMap<u64, String>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        NodeRegistry {
            next_id: AtomicU64::new(0),
            nodes: Mutex::new(BTreeMap::new()),
        }
    }

    fn register(&self, addr: String) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.nodes.lock().unwrap().insert(id, addr);
        id
    }

    fn remove(&self, id: u64) {
        self.nodes.lock().unwrap().remove(&id);
    }

    /// The RPC addresses of every currently registered worker, in a
    /// stable order. Partitioning assigns worker indices 0..N over this
    /// slice, so the order only needs to be stable for the duration of a
    /// single `Init`/recovery call, not across calls.
    pub fn snapshot(&self) -> Vec<String> {
        self.nodes.lock().unwrap().values().cloned().collect()
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        NodeRegistry::new()
    }
}

/// Accept worker registration connections forever. Each worker dials in
/// once, sends its own RPC listen address as a single newline-terminated
/// line (the distilled source instead derives this from the peer IP plus
/// a hardcoded RPC port; a handshake line is used here so tests can run
/// both ends on ephemeral `127.0.0.1:0` ports), then holds the connection
/// open. A blocking read on that connection is this registry's liveness
/// signal: when it returns (EOF or error) the worker is presumed gone and
/// is dropped from the node set.
///
/// Each accepted connection is monitored on its own detached thread, so
/// the accept loop never blocks waiting for one worker to disconnect --
/// mirrors the grounded original's detached `go func(){ ... }()` per
/// registration, which loops straight back to `Accept()`.
pub fn serve_registrations(listener: TcpListener, registry: Arc<NodeRegistry>) {
    for incoming in listener.incoming() {
        let stream = match incoming {
            Ok(s) => s,
            Err(e) => {
                warn!("registration accept failed: {e}");
                continue;
            }
        };
        let registry = Arc::clone(&registry);
        std::thread::spawn(move || monitor_registration(stream, &registry));
    }
}

fn monitor_registration(stream: TcpStream, registry: &NodeRegistry) {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    let mut reader = BufReader::new(stream);
    let mut addr_line = String::new();
    if reader.read_line(&mut addr_line).is_err() || addr_line.trim().is_empty() {
        warn!(peer, "registration handshake failed");
        return;
    }
    let addr = addr_line.trim().to_string();
    let id = registry.register(addr.clone());
    info!(addr, "worker node registered");

    let mut buf = [0u8; 1];
    use std::io::Read;
    let _ = reader.read(&mut buf);

    registry.remove(id);
    warn!(addr, "worker node disconnected");
}
