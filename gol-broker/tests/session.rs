use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use gol_broker::{serve_controller_connections, serve_registrations, Broker};
use gol_grid::{size_int_bytes, BrokerParams, InitialPixels};
use gol_net::read_event;
use test_log::test;

fn blinker_broker_params() -> BrokerParams {
    // A 3-cell horizontal blinker on a 5x5 toroidal grid, sent as
    // sparse coordinates.
    BrokerParams {
        turns: 2,
        threads: 1,
        image_width: 5,
        image_height: 5,
        initial_pixels: InitialPixels::Coordinates(gol_codec::encode_coords(
            &[
                gol_grid::Cell::new(1, 2),
                gol_grid::Cell::new(2, 2),
                gol_grid::Cell::new(3, 2),
            ],
            1,
        )),
    }
}

/// Wires a broker, one real worker (over TCP) and a plain TCP stream
/// standing in for the controller, and drives one full session end to
/// end: registration, Init, two turns of evaluation, and the broker
/// closing the event stream once the session completes.
#[test]
fn test_full_session_runs_two_turns_and_closes() {
    let worker_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let worker_rpc_addr = worker_listener.local_addr().unwrap().to_string();
    thread::spawn(move || gol_worker::serve(worker_listener));

    let broker = Broker::new();

    let registration_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let registration_addr = registration_listener.local_addr().unwrap().to_string();
    let registry = std::sync::Arc::clone(broker.registry());
    thread::spawn(move || serve_registrations(registration_listener, registry));
    thread::spawn(move || gol_worker::register_forever(&registration_addr, &worker_rpc_addr));

    let event_listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let event_addr = event_listener.local_addr().unwrap();
    let slot = std::sync::Arc::clone(broker.controller_slot());
    thread::spawn(move || serve_controller_connections(event_listener, &slot));
    let mut controller_stream = TcpStream::connect(event_addr).unwrap();

    // Give the registration handshake a moment to land before Init looks
    // up the available worker set.
    thread::sleep(Duration::from_millis(100));

    let bp = blinker_broker_params();
    let size_int = size_int_bytes(bp.image_width.max(bp.image_height));
    broker.init(bp).expect("init should succeed with one registered worker");

    let mut turn_complete_count = 0;
    loop {
        match read_event(&mut controller_stream, size_int).unwrap() {
            Some(gol_codec::Event::TurnComplete) => {
                turn_complete_count += 1;
            }
            Some(gol_codec::Event::Flipped(cells)) => {
                assert!(!cells.is_empty());
            }
            Some(other) => panic!("unexpected event before session end: {other:?}"),
            None => break,
        }
    }

    assert_eq!(turn_complete_count, 2);
}
