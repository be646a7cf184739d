use std::net::TcpListener;

use gol_base::Result;

const USAGE: &str = "usage: gol-worker-bin <listen-addr> <broker-registration-addr>";

fn main() {
    gol_cli::install_tracing();
    let mut args = std::env::args().skip(1);
    let listen_addr = gol_cli::next_arg(&mut args, USAGE);
    let broker_addr = gol_cli::next_arg(&mut args, USAGE);

    let code = gol_cli::exit_code(run(&listen_addr, &broker_addr));
    std::process::exit(code);
}

fn run(listen_addr: &str, broker_addr: &str) -> Result<()> {
    let listener = TcpListener::bind(listen_addr)?;
    let own_rpc_addr = listener.local_addr()?.to_string();

    let broker_addr = broker_addr.to_string();
    std::thread::spawn(move || gol_worker::register_forever(&broker_addr, &own_rpc_addr));

    gol_worker::serve(listener)
}
