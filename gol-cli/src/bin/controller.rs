use std::net::TcpStream;

use gol_base::Result;
use gol_codec::encode_initial;
use gol_controller::{Controller, CrosstermIntentSource, GridMirror, StdoutDisplaySink};
use gol_grid::{size_int_bytes, BrokerParams};
use gol_net::{call_broker, BrokerCall, BrokerReply};

const USAGE: &str = "usage: gol-controller-bin <broker-rpc-addr> <broker-event-addr> <width> <height> <turns> <threads> <input.pgm> <output-prefix>";

fn main() {
    gol_cli::install_tracing();
    let mut args = std::env::args().skip(1);
    let rpc_addr = gol_cli::next_arg(&mut args, USAGE);
    let event_addr = gol_cli::next_arg(&mut args, USAGE);
    let width: u32 = gol_cli::next_arg_parsed(&mut args, USAGE);
    let height: u32 = gol_cli::next_arg_parsed(&mut args, USAGE);
    let turns: u32 = gol_cli::next_arg_parsed(&mut args, USAGE);
    let threads: u32 = gol_cli::next_arg_parsed(&mut args, USAGE);
    let input_path = gol_cli::next_arg(&mut args, USAGE);
    let output_prefix = gol_cli::next_arg(&mut args, USAGE);

    let code = gol_cli::exit_code(run(
        &rpc_addr,
        &event_addr,
        width,
        height,
        turns,
        threads,
        &input_path,
        output_prefix,
    ));
    std::process::exit(code);
}

#[allow(clippy::too_many_arguments)]
fn run(
    rpc_addr: &str,
    event_addr: &str,
    width: u32,
    height: u32,
    turns: u32,
    threads: u32,
    input_path: &str,
    output_prefix: String,
) -> Result<()> {
    // The event connection must be open before `Broker.Init` is sent --
    // the broker blocks that call on a controller connection arriving.
    let event_stream = TcpStream::connect(event_addr)?;
    let mut rpc_stream = TcpStream::connect(rpc_addr)?;

    let pixels = gol_controller::read_pgm_file(input_path, width, height)?;
    let initial_pixels = encode_initial(&pixels, width, height);
    let bp = BrokerParams {
        turns,
        threads,
        image_width: width,
        image_height: height,
        initial_pixels,
    };
    bp.validate()?;

    match call_broker(&mut rpc_stream, &BrokerCall::Init(bp))? {
        BrokerReply::Ok => {}
        BrokerReply::Err(msg) => return Err(gol_base::err(msg)),
    }

    let size_int = size_int_bytes(width.max(height));
    let mirror = GridMirror::new(width, height, pixels);
    let display = StdoutDisplaySink;
    let intents = CrosstermIntentSource::new()?;

    let controller = Controller::new(event_stream, rpc_stream, size_int, mirror, display, output_prefix);
    controller.run(intents)
}
