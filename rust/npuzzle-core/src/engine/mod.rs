pub mod frontier;
pub mod path;
pub mod search;

pub use frontier::PriorityFrontier;
pub use path::{reconstruct_path, Predecessors};
pub use search::{astar, astar_with, SearchResult, SearchStatus};
