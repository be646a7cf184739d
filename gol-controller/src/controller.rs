use std::net::TcpStream;
use std::sync::mpsc;
use std::time::Duration;

use gol_base::Result;
use gol_codec::Event;
use gol_net::{call_broker, read_event, BrokerCall};
use tracing::{info, warn};

use crate::display::{DisplayEvent, DisplaySink, StateChange};
use crate::intent::{Intent, IntentSource};
use crate::mirror::GridMirror;
use crate::pgm::write_pgm_file;

const ALIVE_COUNT_PERIOD: Duration = Duration::from_secs(2);

/// Drives one controller session: owns the grid mirror, forwards user
/// intents to the broker's control plane, and turns the broker's event
/// stream into `DisplaySink` calls. Generic over `DisplaySink` so the
/// production stdout sink and test fakes share this one driver.
pub struct Controller<D: DisplaySink> {
    event_stream: TcpStream,
    broker_rpc: TcpStream,
    size_int: u8,
    mirror: GridMirror,
    display: D,
    save_path_prefix: String,
}

impl<D: DisplaySink> Controller<D> {
    pub fn new(
        event_stream: TcpStream,
        broker_rpc: TcpStream,
        size_int: u8,
        mirror: GridMirror,
        display: D,
        save_path_prefix: String,
    ) -> Self {
        Controller {
            event_stream,
            broker_rpc,
            size_int,
            mirror,
            display,
            save_path_prefix,
        }
    }

    fn save_path(&self, turn: u32) -> String {
        format!("{}x{turn}.pgm", self.save_path_prefix)
    }

    fn write_snapshot(&self, turn: u32) -> Result<()> {
        let path = self.save_path(turn);
        write_pgm_file(&path, self.mirror.width(), self.mirror.height(), self.mirror.pixels())?;
        info!(path, turn, "wrote pgm snapshot");
        Ok(())
    }

    /// Runs the session to completion: spawns a thread forwarding
    /// `intents` onto the broker's control plane and another reading the
    /// broker's event stream, then drives the grid mirror and display
    /// sink from the main thread until the broker sends `Quit` or `Kill`
    /// or the event stream closes. Writes a final PGM snapshot on every
    /// terminal path, mirroring the session this is grounded in.
    pub fn run<I: IntentSource + Send + 'static>(mut self, intents: I) -> Result<()> {
        let intent_rpc_stream = self
            .broker_rpc
            .try_clone()
            .map_err(|e| gol_base::err(e.to_string()))?;
        std::thread::spawn(move || run_intent_loop(intents, intent_rpc_stream));

        let mut event_stream = self
            .event_stream
            .try_clone()
            .map_err(|e| gol_base::err(e.to_string()))?;
        let size_int = self.size_int;
        let (tx, rx) = mpsc::channel::<Event>();
        std::thread::spawn(move || loop {
            match read_event(&mut event_stream, size_int) {
                Ok(Some(event)) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Ok(None) => return,
                Err(e) => {
                    warn!("event stream read failed: {e:?}");
                    return;
                }
            }
        });

        self.display
            .on_event(DisplayEvent::StateChanged(StateChange::Running));

        let mut turn = 0u32;
        loop {
            match rx.recv_timeout(ALIVE_COUNT_PERIOD) {
                Ok(Event::Flipped(cells)) => {
                    for cell in cells {
                        self.mirror.apply_flip(cell);
                        self.display.on_event(DisplayEvent::CellFlipped(cell));
                    }
                }
                Ok(Event::TurnComplete) => {
                    self.mirror.commit_turn();
                    self.display
                        .on_event(DisplayEvent::TurnComplete { turn });
                    turn += 1;
                }
                Ok(Event::Pause) => {
                    self.display
                        .on_event(DisplayEvent::StateChanged(StateChange::Paused));
                }
                Ok(Event::Resume) => {
                    self.display
                        .on_event(DisplayEvent::StateChanged(StateChange::Running));
                }
                Ok(Event::Save) => {
                    self.write_snapshot(turn)?;
                }
                Ok(Event::Quit) | Ok(Event::Kill) => {
                    self.write_snapshot(turn)?;
                    self.display
                        .on_event(DisplayEvent::StateChanged(StateChange::Quitting));
                    return Ok(());
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    self.display.on_event(DisplayEvent::AliveCount {
                        turn,
                        count: self.mirror.alive_count(),
                    });
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    self.write_snapshot(turn)?;
                    self.display
                        .on_event(DisplayEvent::StateChanged(StateChange::Quitting));
                    return Ok(());
                }
            }
        }
    }
}

fn run_intent_loop(mut intents: impl IntentSource, mut stream: TcpStream) {
    loop {
        let Some(intent) = intents.next_intent() else {
            return;
        };
        let call = match intent {
            Intent::Save => BrokerCall::Save,
            Intent::Pause => BrokerCall::Pause,
            Intent::Resume => BrokerCall::Resume,
            Intent::Quit => BrokerCall::Quit,
            Intent::Kill => BrokerCall::Kill,
        };
        let terminal = matches!(intent, Intent::Quit | Intent::Kill);
        if let Err(e) = call_broker(&mut stream, &call) {
            warn!("broker rpc for intent {intent:?} failed: {e:?}");
            return;
        }
        if terminal {
            return;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::display::RecordingDisplaySink;
    use crate::intent::FakeIntentSource;
    use gol_grid::Cell;
    use gol_net::{recv_broker_call, send_broker_reply, write_event, BrokerReply};
    use std::net::TcpListener;
    use std::thread;
    use test_log::test;

    fn pair() -> (TcpStream, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).unwrap();
        let (server, _) = listener.accept().unwrap();
        (client, server)
    }

    #[test]
    fn test_full_turn_then_quit_updates_mirror_and_writes_snapshot() {
        let (event_client, mut event_server) = pair();
        let (rpc_client, rpc_server) = pair();

        thread::spawn(move || {
            write_event(&mut event_server, &Event::Flipped(vec![Cell::new(0, 0)]), 1).unwrap();
            write_event(&mut event_server, &Event::TurnComplete, 1).unwrap();
            write_event(&mut event_server, &Event::Quit, 1).unwrap();
        });
        thread::spawn(move || {
            let mut rpc_server = rpc_server;
            while let Some(call) = recv_broker_call(&mut rpc_server).unwrap() {
                assert!(matches!(call, BrokerCall::Quit));
                send_broker_reply(&mut rpc_server, &BrokerReply::Ok).unwrap();
                return;
            }
        });

        let dir = std::env::temp_dir().join(format!("gol-controller-test-{}", std::process::id()));
        let mirror = GridMirror::new(2, 2, vec![0, 0, 0, 0]);
        let display = RecordingDisplaySink::new();
        let controller = Controller::new(
            event_client,
            rpc_client,
            1,
            mirror,
            display,
            dir.to_string_lossy().into_owned(),
        );
        let intents = FakeIntentSource::new(vec![Intent::Quit]);
        controller.run(intents).unwrap();

        let snapshot_path = format!("{}x1.pgm", dir.to_string_lossy());
        let bytes = std::fs::read(&snapshot_path).unwrap();
        assert!(bytes.starts_with(b"P5\n2 2\n255\n"));
        std::fs::remove_file(&snapshot_path).ok();
    }
}
