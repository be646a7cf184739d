use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::{info, warn};

/// Dial the broker's registration port, announce `own_rpc_addr` (the
/// address this worker's own `Worker.*` RPC listener is bound to) with a
/// single newline-terminated line, then block until the connection drops
/// and retry. The broker never writes anything back here; it simply
/// holds the read open to detect this worker going away.
///
/// The distilled source instead derives a worker's RPC address from the
/// registration connection's peer IP plus a hardcoded port; sending the
/// address explicitly here means broker and worker can each bind an
/// ephemeral port, which the hardcoded-port scheme can't support.
pub fn register_forever(broker_addr: &str, own_rpc_addr: &str) -> ! {
    loop {
        match TcpStream::connect(broker_addr) {
            Ok(mut stream) => {
                if writeln!(stream, "{own_rpc_addr}").is_err() {
                    warn!("failed to send registration handshake");
                } else {
                    info!(addr = broker_addr, rpc_addr = own_rpc_addr, "registered with broker");
                    let mut buf = [0u8; 1];
                    // Blocks until the broker closes the connection.
                    let _ = stream.read(&mut buf);
                    warn!("broker disconnected");
                }
            }
            Err(e) => {
                warn!("failed to register with broker: {e}");
            }
        }
        std::thread::sleep(Duration::from_secs(1));
    }
}
