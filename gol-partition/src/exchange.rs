use gol_grid::{Cell, ExchangeGraph, Partition};

fn partition_contains(partition: &Partition, cell: Cell) -> bool {
    partition.iter().any(|b| b.contains(cell))
}

/// Build the exchange graph for a set of per-worker partitions: for every
/// boundary cell of every block, mark each worker other than its own owner
/// whose partition contains one of that cell's toroidal neighbors.
pub fn build_exchange_graph(
    width: u32,
    height: u32,
    partitions: &[Partition],
) -> ExchangeGraph {
    let mut graph = ExchangeGraph::new(width, height);
    for (owner, partition) in partitions.iter().enumerate() {
        for block in partition {
            for cell in block.cells().filter(|c| block.is_boundary(*c)) {
                for neighbor in cell.surrounding(width, height) {
                    for (other, other_partition) in partitions.iter().enumerate() {
                        if other == owner {
                            continue;
                        }
                        if partition_contains(other_partition, neighbor) {
                            graph.mark(cell, other);
                            break;
                        }
                    }
                }
            }
        }
    }
    graph
}
