use gol_grid::Cell;

/// Local-only run states the controller announces around broker pause/
/// resume echoes and session end; these never appear on the wire, they
/// exist purely for `DisplaySink` consumers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateChange {
    Running,
    Paused,
    Quitting,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DisplayEvent {
    CellFlipped(Cell),
    TurnComplete { turn: u32 },
    StateChanged(StateChange),
    AliveCount { turn: u32, count: usize },
}

/// The visualization side of the controller, standing in for the SDL
/// window of the distilled source. Swappable so tests can assert on a
/// recorded event list instead of driving a real terminal.
pub trait DisplaySink {
    fn on_event(&mut self, event: DisplayEvent);
}

/// Prints one line per event to stdout. The production `DisplaySink`;
/// deliberately not a terminal UI, so the interactive surface stays out
/// of the hard design path per the spec it's grounded in.
#[derive(Default)]
pub struct StdoutDisplaySink;

impl DisplaySink for StdoutDisplaySink {
    fn on_event(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::CellFlipped(cell) => println!("flip ({}, {})", cell.x, cell.y),
            DisplayEvent::TurnComplete { turn } => println!("turn {turn} complete"),
            DisplayEvent::StateChanged(state) => println!("state: {state:?}"),
            DisplayEvent::AliveCount { turn, count } => {
                println!("turn {turn}: {count} cells alive")
            }
        }
    }
}

#[cfg(test)]
pub struct RecordingDisplaySink {
    pub events: Vec<DisplayEvent>,
}

#[cfg(test)]
impl RecordingDisplaySink {
    pub fn new() -> Self {
        RecordingDisplaySink { events: Vec::new() }
    }
}

#[cfg(test)]
impl DisplaySink for RecordingDisplaySink {
    fn on_event(&mut self, event: DisplayEvent) {
        self.events.push(event);
    }
}
