use gol_base::{GolError, Result};
use gol_codec::decode_initial;
use gol_grid::{Adjustment, BrokerParams, ExchangeGraph, Matrix, WorkerParams};
use tracing::{debug, info, warn};

use crate::control::{ControlEvent, ControlMailbox};
use crate::dispatch::{self, WorkerConn};
use crate::event_conn::EventConn;
use crate::planning::{self, Plan};
use crate::registry::NodeRegistry;

/// How a session ended, as observed by the driver loop.
#[derive(Debug, Eq, PartialEq)]
pub enum SessionOutcome {
    /// All `bp.turns` turns evaluated with no Quit/Kill in between.
    Complete,
    Quit,
    Kill,
}

fn build_initial_matrix(bp: &BrokerParams) -> Result<Matrix> {
    let pixels = decode_initial(&bp.initial_pixels, bp.image_width, bp.image_height)?;
    Ok(Matrix::from_pixels(bp.image_width, bp.image_height, pixels))
}

fn build_worker_params(bp: &BrokerParams, plan: &Plan, matrix: &Matrix) -> Vec<WorkerParams> {
    plan.partitions
        .iter()
        .map(|partition| WorkerParams {
            turns: bp.turns,
            image_width: bp.image_width,
            image_height: bp.image_height,
            partition: partition.clone(),
            pixels: matrix.pixels().to_vec(),
        })
        .collect()
}

/// Partition against the currently available workers and dispatch
/// `Worker.Init` to all of them. Shared by the initial `Init` call and
/// every recovery attempt -- the only difference is which `Matrix` is
/// already on hand to re-seed from.
fn init_round(
    bp: &BrokerParams,
    registry: &NodeRegistry,
    matrix: &Matrix,
) -> Result<(Vec<WorkerConn>, ExchangeGraph)> {
    let addrs = registry.snapshot();
    if addrs.is_empty() {
        return Err(GolError::NoWorkers.into());
    }
    let plan = planning::plan(bp, &addrs);
    if plan.worker_addrs.is_empty() {
        return Err(GolError::NoWorkers.into());
    }
    let params = build_worker_params(bp, &plan, matrix);
    let conns = dispatch::connect_and_init(&plan.worker_addrs, params)?;
    Ok((conns, plan.exchange_graph))
}

/// Run a session's initial partitioning/dispatch, i.e. the `Init` RPC's
/// own work before it hands off to the driver loop. Kept separate from
/// [`run_driver_loop`] because `Init`'s caller needs to observe whether
/// this step itself failed (to report `NoWorkers` synchronously) while
/// the loop, once started, only ever reports failure by ending the
/// session.
pub fn init_session(bp: &BrokerParams, registry: &NodeRegistry) -> Result<(Matrix, Vec<WorkerConn>, ExchangeGraph)> {
    bp.validate()?;
    let matrix = build_initial_matrix(bp)?;
    let (conns, graph) = init_round(bp, registry, &matrix)?;
    Ok((matrix, conns, graph))
}

/// The per-session driver: evaluates turns until completion, a terminal
/// control event, or an unrecoverable failure (no workers left to
/// recover onto). Runs on its own thread for the lifetime of a session.
pub fn run_driver_loop(
    bp: &BrokerParams,
    registry: &NodeRegistry,
    mailbox: &ControlMailbox,
    mut event_conn: EventConn,
    mut matrix: Matrix,
    mut conns: Vec<WorkerConn>,
    mut exchange_graph: ExchangeGraph,
) -> Result<SessionOutcome> {
    let mut turn = 0u32;
    let mut adjustments = vec![Adjustment::new(); conns.len()];

    let result = (|| -> Result<SessionOutcome> {
        loop {
            if turn == bp.turns {
                return Ok(SessionOutcome::Complete);
            }

            match dispatch::dispatch_next(&mut conns, &adjustments) {
                Ok(flipped_per_worker) => {
                    for a in adjustments.iter_mut() {
                        *a = Adjustment::new();
                    }
                    for bytes in flipped_per_worker {
                        let cells = gol_codec::decode_coords(&bytes, event_conn.size_int())?;
                        event_conn.write_flipped(cells.clone())?;
                        crate::adjustments::apply_flips_and_accumulate_adjustments(
                            &mut matrix,
                            &exchange_graph,
                            &cells,
                            &mut adjustments,
                        );
                    }
                    event_conn.write_turn_complete()?;
                    debug!(turn, "turn complete");
                    turn += 1;
                }
                Err(e) => {
                    warn!("worker rpc failed at turn {turn}: {e:?}; recovering");
                    let (new_conns, new_graph) = init_round(bp, registry, &matrix)?;
                    conns = new_conns;
                    exchange_graph = new_graph;
                    adjustments = vec![Adjustment::new(); conns.len()];
                    continue;
                }
            }

            if let Some(terminal) = drain_control_mailbox(mailbox, &mut event_conn)? {
                return Ok(terminal);
            }
        }
    })();

    dispatch::kill_all(&mut conns);
    match &result {
        Ok(outcome) => info!(?outcome, "session ended"),
        Err(e) => warn!("session ended with unrecoverable error: {e:?}"),
    }
    result
}

/// Drain the control mailbox after a turn. While paused, blocks for the
/// next event rather than returning; `Pause` keeps the loop here, any
/// other event (including a second `Pause`) is forwarded and, if it's
/// `Quit`/`Kill`, returned as the session's terminal outcome.
fn drain_control_mailbox(
    mailbox: &ControlMailbox,
    event_conn: &mut EventConn,
) -> Result<Option<SessionOutcome>> {
    let mut paused = false;
    loop {
        let event = if paused {
            Some(mailbox.take_blocking())
        } else {
            mailbox.try_take()
        };
        let Some(event) = event else { return Ok(None) };
        event_conn.write_control_echo(event)?;
        match event {
            ControlEvent::Pause => paused = true,
            ControlEvent::Resume => paused = false,
            ControlEvent::Save => {}
            ControlEvent::Quit => return Ok(Some(SessionOutcome::Quit)),
            ControlEvent::Kill => return Ok(Some(SessionOutcome::Kill)),
        }
        if !paused {
            return Ok(None);
        }
    }
}
