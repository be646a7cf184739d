use std::net::TcpListener;
use std::sync::Arc;

use gol_base::Result;
use gol_broker::Broker;

const USAGE: &str = "usage: gol-broker-bin <rpc-addr> <registration-addr> <event-addr>";

fn main() {
    gol_cli::install_tracing();
    let mut args = std::env::args().skip(1);
    let rpc_addr = gol_cli::next_arg(&mut args, USAGE);
    let registration_addr = gol_cli::next_arg(&mut args, USAGE);
    let event_addr = gol_cli::next_arg(&mut args, USAGE);

    let code = gol_cli::exit_code(run(&rpc_addr, &registration_addr, &event_addr));
    std::process::exit(code);
}

fn run(rpc_addr: &str, registration_addr: &str, event_addr: &str) -> Result<()> {
    let rpc_listener = TcpListener::bind(rpc_addr)?;
    let registration_listener = TcpListener::bind(registration_addr)?;
    let event_listener = TcpListener::bind(event_addr)?;

    let broker = Arc::new(Broker::new());

    {
        let broker = Arc::clone(&broker);
        std::thread::spawn(move || {
            if let Err(e) = gol_broker::serve_broker_rpc(rpc_listener, &broker) {
                tracing::error!("broker rpc server ended: {e:?}");
            }
        });
    }
    {
        let registry = Arc::clone(broker.registry());
        std::thread::spawn(move || gol_broker::serve_registrations(registration_listener, registry));
    }
    {
        let slot = Arc::clone(broker.controller_slot());
        std::thread::spawn(move || {
            gol_broker::serve_controller_connections(event_listener, &slot)
        });
    }

    broker.wait_for_kill();
    Ok(())
}
