pub mod errors;
pub mod state;
pub mod heuristics;
pub mod generator;
pub mod options;
pub mod engine;

pub use errors::PuzzleError;
pub use state::{Move, PuzzleState, DEFAULT_SIDE, MAX_SIDE};
pub use heuristics::{Evaluator, GoalTable, Heuristic, HeuristicKind};
pub use generator::{generate_final_state, generate_from_walk, generate_random_solvable, is_solvable};
pub use options::SearchOptions;
pub use engine::{astar, astar_with, reconstruct_path, PriorityFrontier, SearchResult, SearchStatus};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
