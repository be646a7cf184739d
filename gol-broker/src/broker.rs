use std::sync::{Arc, Condvar, Mutex};

use gol_base::Result;
use gol_grid::{size_int_bytes, BrokerParams};
use tracing::info;

use crate::control::{ControlEvent, ControlMailbox};
use crate::controller_conn::ControllerConnSlot;
use crate::event_conn::EventConn;
use crate::registry::NodeRegistry;
use crate::session::{self, SessionOutcome};

/// The broker singleton: owns the node registry, the controller
/// connection slot, and the control mailbox, and turns `Broker.*` RPCs
/// into session lifecycle actions. A session's actual turn-by-turn work
/// happens on a detached thread spawned by [`Broker::init`]; everything
/// here either starts that thread or posts into its control mailbox.
pub struct Broker {
    registry: Arc<NodeRegistry>,
    controller_slot: Arc<ControllerConnSlot>,
    mailbox: Arc<ControlMailbox>,
    killed: Arc<(Mutex<bool>, Condvar)>,
}

impl Broker {
    pub fn new() -> Self {
        Broker {
            registry: Arc::new(NodeRegistry::new()),
            controller_slot: Arc::new(ControllerConnSlot::new()),
            mailbox: Arc::new(ControlMailbox::new()),
            killed: Arc::new((Mutex::new(false), Condvar::new())),
        }
    }

    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    pub fn controller_slot(&self) -> &Arc<ControllerConnSlot> {
        &self.controller_slot
    }

    /// `Broker.Init`: waits (if necessary) for a controller connection,
    /// partitions and dispatches `Worker.Init` to the currently available
    /// workers, then launches the driver loop on its own thread and
    /// returns. Fails synchronously with `NoWorkers`/`InvalidParams` if
    /// the session can't even start; once the driver thread is running,
    /// failures surface only as that thread ending the session.
    pub fn init(&self, bp: BrokerParams) -> Result<()> {
        info!(
            turns = bp.turns,
            threads = bp.threads,
            width = bp.image_width,
            height = bp.image_height,
            "broker init"
        );
        let stream = self.controller_slot.take_or_wait();
        let size_int = size_int_bytes(bp.image_width.max(bp.image_height));
        let event_conn = EventConn::new(stream, size_int);

        let (matrix, conns, graph) = session::init_session(&bp, &self.registry)?;

        let registry = Arc::clone(&self.registry);
        let mailbox = Arc::clone(&self.mailbox);
        let killed = Arc::clone(&self.killed);
        std::thread::spawn(move || {
            let outcome = session::run_driver_loop(
                &bp,
                &registry,
                &mailbox,
                event_conn,
                matrix,
                conns,
                graph,
            );
            if matches!(outcome, Ok(SessionOutcome::Kill)) {
                let (lock, cvar) = &*killed;
                *lock.lock().unwrap() = true;
                cvar.notify_all();
            }
        });
        Ok(())
    }

    pub fn pause(&self) {
        info!("broker pause");
        self.mailbox.post(ControlEvent::Pause);
    }

    pub fn resume(&self) {
        info!("broker resume");
        self.mailbox.post(ControlEvent::Resume);
    }

    pub fn save(&self) {
        info!("broker save");
        self.mailbox.post(ControlEvent::Save);
    }

    pub fn quit(&self) {
        info!("broker quit");
        self.mailbox.post(ControlEvent::Quit);
    }

    pub fn kill(&self) {
        info!("broker kill");
        self.mailbox.post(ControlEvent::Kill);
    }

    /// Block the calling thread (normally the process's `main`) until a
    /// session ends via `Kill`. Mirrors the distilled source's
    /// `sync.WaitGroup` gate between RPC service startup and
    /// `shutdownNodes`/process exit.
    pub fn wait_for_kill(&self) {
        let (lock, cvar) = &*self.killed;
        let mut killed = lock.lock().unwrap();
        while !*killed {
            killed = cvar.wait(killed).unwrap();
        }
    }
}

impl Default for Broker {
    fn default() -> Self {
        Broker::new()
    }
}
