use crate::frame::{read_framed, write_framed};
use gol_base::{err, Result};
use gol_grid::{Adjustment, BrokerParams, WorkerParams};
use serde::{Deserialize, Serialize};
use std::net::TcpStream;

/// A call a broker makes to a worker. `Next` carries the surrounding-count
/// adjustments the *previous* turn's flips owe this worker, as resolved by
/// the broker's exchange graph (empty on the first turn).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WorkerCall {
    Init(WorkerParams),
    Next(Adjustment),
    Kill,
}

/// A worker's reply. `Next`'s payload is the packed coordinates of every
/// cell this worker flipped this turn (see `gol_codec::encode_coords`),
/// exactly as the broker re-emits it on the controller event stream.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum WorkerReply {
    InitOk,
    NextOk(Vec<u8>),
    KillOk,
    Err(String),
}

/// A call a controller makes to a broker.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BrokerCall {
    Init(BrokerParams),
    Pause,
    Resume,
    Save,
    Quit,
    Kill,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BrokerReply {
    Ok,
    Err(String),
}

fn call<Req: Serialize, Resp: serde::de::DeserializeOwned>(
    stream: &mut TcpStream,
    req: &Req,
) -> Result<Resp> {
    write_framed(stream, req)?;
    read_framed(stream)?.ok_or_else(|| err("connection closed before reply"))
}

pub fn call_worker(stream: &mut TcpStream, req: &WorkerCall) -> Result<WorkerReply> {
    call(stream, req)
}

pub fn call_broker(stream: &mut TcpStream, req: &BrokerCall) -> Result<BrokerReply> {
    call(stream, req)
}

/// Read one incoming call off an accepted connection, for use on the
/// serving side of either RPC surface.
pub fn recv_worker_call(stream: &mut TcpStream) -> Result<Option<WorkerCall>> {
    read_framed(stream)
}

pub fn recv_broker_call(stream: &mut TcpStream) -> Result<Option<BrokerCall>> {
    read_framed(stream)
}

pub fn send_worker_reply(stream: &mut TcpStream, reply: &WorkerReply) -> Result<()> {
    write_framed(stream, reply)
}

pub fn send_broker_reply(stream: &mut TcpStream, reply: &BrokerReply) -> Result<()> {
    write_framed(stream, reply)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::net::TcpListener;
    use std::thread;
    use test_log::test;

    #[test]
    fn test_worker_call_roundtrip_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let call = recv_worker_call(&mut stream).unwrap().unwrap();
            assert!(matches!(call, WorkerCall::Kill));
            send_worker_reply(&mut stream, &WorkerReply::KillOk).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        let reply = call_worker(&mut client, &WorkerCall::Kill).unwrap();
        assert!(matches!(reply, WorkerReply::KillOk));
        server.join().unwrap();
    }
}
