use std::sync::{Condvar, Mutex};
use std::time::Duration;

/// An intent the controller has asked the session driver to act on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlEvent {
    Pause,
    Resume,
    Save,
    Quit,
    Kill,
}

/// A capacity-1, single-producer/single-consumer mailbox: a second event
/// arriving before the driver has drained the first replaces it rather
/// than blocking or erroring (`ControlMailboxOverflow` in the spec's
/// terms resolves to last-writer-wins, not an error).
pub struct ControlMailbox {
    slot: Mutex<Option<ControlEvent>>,
    signal: Condvar,
}

impl ControlMailbox {
    pub fn new() -> Self {
        ControlMailbox {
            slot: Mutex::new(None),
            signal: Condvar::new(),
        }
    }

    pub fn post(&self, event: ControlEvent) {
        let mut slot = self.slot.lock().unwrap();
        *slot = Some(event);
        self.signal.notify_one();
    }

    /// Take the pending event, if any, without blocking.
    pub fn try_take(&self) -> Option<ControlEvent> {
        self.slot.lock().unwrap().take()
    }

    /// Block until an event is posted, then take and return it. Used by
    /// the driver while paused, where it has nothing better to do.
    pub fn take_blocking(&self) -> ControlEvent {
        let mut slot = self.slot.lock().unwrap();
        loop {
            if let Some(event) = slot.take() {
                return event;
            }
            // Bounded wait so a spurious wakeup or a missed notify can't
            // wedge the driver forever; the loop just rechecks the slot.
            let (guard, _) = self
                .signal
                .wait_timeout(slot, Duration::from_millis(200))
                .unwrap();
            slot = guard;
        }
    }
}

impl Default for ControlMailbox {
    fn default() -> Self {
        ControlMailbox::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_second_post_supplants_first() {
        let mailbox = ControlMailbox::new();
        mailbox.post(ControlEvent::Pause);
        mailbox.post(ControlEvent::Resume);
        assert_eq!(mailbox.try_take(), Some(ControlEvent::Resume));
        assert_eq!(mailbox.try_take(), None);
    }

    #[test]
    fn test_take_blocking_waits_for_post() {
        let mailbox = ControlMailbox::new();
        std::thread::scope(|scope| {
            scope.spawn(|| {
                std::thread::sleep(Duration::from_millis(20));
                mailbox.post(ControlEvent::Quit);
            });
            assert_eq!(mailbox.take_blocking(), ControlEvent::Quit);
        });
    }
}
