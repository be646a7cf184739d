use std::net::TcpStream;

use gol_base::Result;
use gol_codec::Event;
use gol_grid::Cell;
use gol_net::write_event;

use crate::control::ControlEvent;

/// The broker's half of the broker<->controller event stream: one
/// outbound-only connection, written exclusively by the session driver
/// thread for the lifetime of a session.
pub struct EventConn {
    stream: TcpStream,
    size_int: u8,
}

impl EventConn {
    pub fn new(stream: TcpStream, size_int: u8) -> Self {
        EventConn { stream, size_int }
    }

    pub fn size_int(&self) -> u8 {
        self.size_int
    }

    /// Write a turn's worth of flipped cells, skipping the write entirely
    /// when there's nothing to report (see `Event::encode`'s elision
    /// rule for an empty `Flipped`).
    pub fn write_flipped(&mut self, cells: Vec<Cell>) -> Result<()> {
        write_event(&mut self.stream, &Event::Flipped(cells), self.size_int)
    }

    pub fn write_turn_complete(&mut self) -> Result<()> {
        write_event(&mut self.stream, &Event::TurnComplete, self.size_int)
    }

    /// Echo a drained control event back to the controller, in the same
    /// wire vocabulary it used to ask for it.
    pub fn write_control_echo(&mut self, event: ControlEvent) -> Result<()> {
        let wire = match event {
            ControlEvent::Pause => Event::Pause,
            ControlEvent::Resume => Event::Resume,
            ControlEvent::Save => Event::Save,
            ControlEvent::Quit => Event::Quit,
            ControlEvent::Kill => Event::Kill,
        };
        write_event(&mut self.stream, &wire, self.size_int)
    }
}
