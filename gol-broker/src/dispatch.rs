use gol_base::{GolError, Result};
use gol_grid::{Adjustment, WorkerParams};
use gol_net::{call_worker, WorkerCall, WorkerReply};
use std::net::TcpStream;

/// One live RPC connection to a worker for the lifetime of a session: the
/// broker dials once per worker at `Init`/recovery and reuses the same
/// connection for every `Worker.Next` of that round, since the worker
/// keeps its per-turn matrix state scoped to the connection.
pub struct WorkerConn {
    pub addr: String,
    stream: TcpStream,
}

impl WorkerConn {
    fn call(&mut self, call: &WorkerCall) -> Result<WorkerReply> {
        call_worker(&mut self.stream, call)
    }
}

/// Dial every worker in `addrs` and send it its `Worker.Init`, all in
/// parallel. Any connection or RPC failure fails the whole round with the
/// index of the first worker that failed, which the caller turns into
/// recovery.
pub fn connect_and_init(addrs: &[String], params: Vec<WorkerParams>) -> Result<Vec<WorkerConn>> {
    let results: Vec<Result<WorkerConn>> = std::thread::scope(|scope| {
        let handles: Vec<_> = addrs
            .iter()
            .zip(params)
            .enumerate()
            .map(|(index, (addr, wp))| scope.spawn(move || init_one(index, addr, wp)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("init dispatch thread panicked"))
            .collect()
    });

    let mut conns = Vec::with_capacity(results.len());
    for r in results {
        conns.push(r?);
    }
    Ok(conns)
}

fn init_one(index: usize, addr: &str, wp: WorkerParams) -> Result<WorkerConn> {
    let stream = TcpStream::connect(addr).map_err(|_| worker_rpc_failure(index))?;
    let mut conn = WorkerConn {
        addr: addr.to_string(),
        stream,
    };
    match conn.call(&WorkerCall::Init(wp))? {
        WorkerReply::InitOk => Ok(conn),
        _ => Err(worker_rpc_failure(index)),
    }
}

/// Drive one `Worker.Next` round across every connection in parallel,
/// returning each worker's packed flipped-coordinate reply in the same
/// order as `conns`/`adjustments`. On any failure, returns the index of
/// the first failing worker.
pub fn dispatch_next(
    conns: &mut [WorkerConn],
    adjustments: &[Adjustment],
) -> Result<Vec<Vec<u8>>> {
    let results: Vec<Result<Vec<u8>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = conns
            .iter_mut()
            .zip(adjustments)
            .enumerate()
            .map(|(index, (conn, adjustment))| scope.spawn(move || next_one(index, conn, adjustment)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("next dispatch thread panicked"))
            .collect()
    });

    let mut flipped = Vec::with_capacity(results.len());
    for r in results {
        flipped.push(r?);
    }
    Ok(flipped)
}

fn next_one(index: usize, conn: &mut WorkerConn, adjustment: &Adjustment) -> Result<Vec<u8>> {
    match conn.call(&WorkerCall::Next(adjustment.clone())) {
        Ok(WorkerReply::NextOk(bytes)) => Ok(bytes),
        _ => Err(worker_rpc_failure(index)),
    }
}

/// Best-effort `Worker.Kill` to every connection; errors are logged, not
/// propagated, since the session is already tearing down.
pub fn kill_all(conns: &mut [WorkerConn]) {
    for conn in conns {
        if let Err(e) = conn.call(&WorkerCall::Kill) {
            tracing::warn!(addr = conn.addr, "kill rpc failed: {e:?}");
        }
    }
}

fn worker_rpc_failure(worker: usize) -> gol_base::Error {
    GolError::WorkerRpcFailure { worker }.into()
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::{Block, Cell, Partition};
    use std::net::TcpListener;
    use test_log::test;

    fn sample_params(partition: Partition) -> WorkerParams {
        WorkerParams {
            turns: 1,
            image_width: 4,
            image_height: 4,
            partition,
            pixels: vec![0u8; 16],
        }
    }

    #[test]
    fn test_connect_and_init_succeeds_against_live_worker() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        std::thread::spawn(move || gol_worker::serve(listener));

        let partition = vec![Block::new(Cell::new(0, 0), Cell::new(4, 4))];
        let conns = connect_and_init(&[addr], vec![sample_params(partition)]).unwrap();
        assert_eq!(conns.len(), 1);
    }

    #[test]
    fn test_connect_and_init_fails_with_no_listener() {
        let bogus = "127.0.0.1:1".to_string();
        let partition = vec![Block::new(Cell::new(0, 0), Cell::new(4, 4))];
        let result = connect_and_init(&[bogus], vec![sample_params(partition)]);
        assert!(result.is_err());
    }
}
