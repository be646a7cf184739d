use crate::worker::Worker;
use gol_base::Result;
use gol_net::{recv_worker_call, send_worker_reply, WorkerCall, WorkerReply};
use std::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

/// Accept broker connections on `listener` and serve `Worker.{Init,Next,Kill}`
/// RPCs on each. Every accepted connection is served on its own detached
/// thread, so a broker recovering from a failed peer can dial in and
/// re-`Init` a surviving worker while that worker's previous (stale)
/// connection is still draining -- mirrors the grounded original's
/// `net/rpc` server, which hands each accepted connection to its own
/// goroutine rather than serving them one at a time.
pub fn serve(listener: TcpListener) -> Result<()> {
    for stream in listener.incoming() {
        let stream = stream?;
        std::thread::spawn(move || {
            if let Err(e) = serve_connection(stream) {
                error!("worker rpc connection ended with error: {e:?}");
            }
        });
    }
    Ok(())
}

fn serve_connection(mut stream: TcpStream) -> Result<()> {
    let mut worker: Option<Worker> = None;
    while let Some(call) = recv_worker_call(&mut stream)? {
        let reply = match call {
            WorkerCall::Init(wp) => {
                worker = Some(Worker::init(wp));
                WorkerReply::InitOk
            }
            WorkerCall::Next(adjustment) => match &mut worker {
                Some(w) => match w.next_turn(&adjustment) {
                    Ok(bytes) => WorkerReply::NextOk(bytes),
                    Err(e) => WorkerReply::Err(format!("{e:?}")),
                },
                None => WorkerReply::Err("Next called before Init".into()),
            },
            WorkerCall::Kill => {
                info!("worker received kill");
                send_worker_reply(&mut stream, &WorkerReply::KillOk)?;
                return Ok(());
            }
        };
        send_worker_reply(&mut stream, &reply)?;
    }
    warn!("broker connection closed");
    Ok(())
}
