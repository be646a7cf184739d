use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use gol_base::{GolError, Result};

/// A user-driven action, translated from a keypress (or a test fake) into
/// the `Broker.*` RPC it corresponds to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Intent {
    Save,
    Pause,
    Resume,
    Quit,
    Kill,
}

/// Yields the controller's next user intent. Blocking by design -- the
/// production implementation waits on a real keypress, and a session with
/// no pending intent has nothing else for this source to do.
pub trait IntentSource {
    /// Returns `None` once the source is exhausted (terminal closed, fake
    /// drained) -- the controller treats that the same as a `Quit`.
    fn next_intent(&mut self) -> Option<Intent>;
}

/// Reads raw terminal keypresses and maps `{s, p, q, k}` onto `Intent`,
/// exactly as the session this is grounded in: `p` toggles a local
/// pause/resume flag rather than always emitting `Pause`.
pub struct CrosstermIntentSource {
    paused: bool,
}

impl CrosstermIntentSource {
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(|e| GolError::Io(e.to_string()))?;
        Ok(CrosstermIntentSource { paused: false })
    }
}

impl Drop for CrosstermIntentSource {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

impl IntentSource for CrosstermIntentSource {
    fn next_intent(&mut self) -> Option<Intent> {
        loop {
            let ev = event::read().ok()?;
            let CtEvent::Key(key) = ev else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            return match key.code {
                KeyCode::Char('s') => Some(Intent::Save),
                KeyCode::Char('q') => Some(Intent::Quit),
                KeyCode::Char('k') => Some(Intent::Kill),
                KeyCode::Char('p') => {
                    self.paused = !self.paused;
                    Some(if self.paused {
                        Intent::Pause
                    } else {
                        Intent::Resume
                    })
                }
                _ => continue,
            };
        }
    }
}

#[cfg(test)]
pub struct FakeIntentSource {
    queue: std::collections::VecDeque<Intent>,
}

#[cfg(test)]
impl FakeIntentSource {
    pub fn new(intents: Vec<Intent>) -> Self {
        FakeIntentSource {
            queue: intents.into(),
        }
    }
}

#[cfg(test)]
impl IntentSource for FakeIntentSource {
    fn next_intent(&mut self) -> Option<Intent> {
        self.queue.pop_front()
    }
}
