use gol_grid::{Block, Partition};

/// Group `blocks` into `node_count` partitions, one per worker, spreading
/// blocks as evenly as possible. If there are fewer blocks than nodes,
/// each block becomes its own single-block partition and the remaining
/// nodes get none; the caller only dials the nodes it got a partition for.
pub fn assign_to_nodes(node_count: usize, blocks: &[Block]) -> Vec<Partition> {
    if blocks.len() <= node_count {
        return blocks.iter().map(|b| vec![*b]).collect();
    }
    let avg = blocks.len() as f64 / node_count as f64;
    let mut partitions = Vec::with_capacity(node_count);
    for i in 0..node_count {
        let start = (i as f64 * avg).round() as usize;
        let end = ((i + 1) as f64 * avg).round() as usize;
        partitions.push(blocks[start..end].to_vec());
    }
    partitions
}

#[cfg(test)]
mod test {
    use super::*;
    use gol_grid::Cell;
    use test_log::test;

    fn sample_blocks(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| Block::new(Cell::new(0, i as u32), Cell::new(10, i as u32 + 1)))
            .collect()
    }

    #[test]
    fn test_fewer_blocks_than_nodes_is_one_to_one() {
        let blocks = sample_blocks(2);
        let partitions = assign_to_nodes(5, &blocks);
        assert_eq!(partitions.len(), 2);
        assert_eq!(partitions[0].len(), 1);
        assert_eq!(partitions[1].len(), 1);
    }

    #[test]
    fn test_more_blocks_than_nodes_covers_all_blocks() {
        let blocks = sample_blocks(10);
        let partitions = assign_to_nodes(3, &blocks);
        assert_eq!(partitions.len(), 3);
        let total: usize = partitions.iter().map(|p| p.len()).sum();
        assert_eq!(total, 10);
    }
}
