mod controller;
mod display;
mod intent;
mod mirror;
mod pgm;

pub use controller::Controller;
pub use display::{DisplayEvent, DisplaySink, StateChange, StdoutDisplaySink};
pub use intent::{CrosstermIntentSource, Intent, IntentSource};
pub use mirror::GridMirror;
pub use pgm::{read_pgm, read_pgm_file, write_pgm, write_pgm_file};
