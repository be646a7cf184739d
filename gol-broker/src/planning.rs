use gol_grid::{BrokerParams, ExchangeGraph, Partition};
use gol_partition::{assign_to_nodes, build_exchange_graph, divide_to_blocks};

/// A fully resolved assignment for one turn-evaluation round: which
/// worker addresses are participating, what partition each one owns (in
/// the same order, so index `i` of both vecs describes worker `i`), and
/// the exchange graph built against that assignment.
pub struct Plan {
    pub worker_addrs: Vec<String>,
    pub partitions: Vec<Partition>,
    pub exchange_graph: ExchangeGraph,
}

/// Partition the grid across `available_workers` and build the exchange
/// graph for the result. Used identically at `Init` and at the start of
/// recovery -- the only difference between the two call sites is which
/// `Matrix` state already exists.
pub fn plan(bp: &BrokerParams, available_workers: &[String]) -> Plan {
    let blocks = divide_to_blocks(bp.threads, bp.image_width, bp.image_height);
    let partitions = assign_to_nodes(available_workers.len(), &blocks);
    let worker_addrs = available_workers[..partitions.len()].to_vec();
    let exchange_graph = build_exchange_graph(bp.image_width, bp.image_height, &partitions);
    Plan {
        worker_addrs,
        partitions,
        exchange_graph,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::InitialPixels;
    use test_log::test;

    fn sample_params() -> BrokerParams {
        BrokerParams {
            turns: 5,
            threads: 4,
            image_width: 16,
            image_height: 16,
            initial_pixels: InitialPixels::Coordinates(vec![]),
        }
    }

    #[test]
    fn test_plan_assigns_one_partition_per_worker() {
        let bp = sample_params();
        let workers = vec!["a".to_string(), "b".to_string()];
        let plan = plan(&bp, &workers);
        assert_eq!(plan.worker_addrs, workers);
        assert_eq!(plan.partitions.len(), 2);
    }

    #[test]
    fn test_plan_drops_excess_workers_when_blocks_run_out() {
        let mut bp = sample_params();
        bp.threads = 1;
        let workers = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let plan = plan(&bp, &workers);
        assert_eq!(plan.partitions.len(), 1);
        assert_eq!(plan.worker_addrs, vec!["a".to_string()]);
    }
}
