mod assign;
mod divide;
mod exchange;

pub use assign::assign_to_nodes;
pub use divide::divide_to_blocks;
pub use exchange::build_exchange_graph;
