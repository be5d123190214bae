use rustc_hash::FxHashMap;

use crate::state::{Move, PuzzleState};

/// For each discovered state, the state it was reached from and the blank move taken.
pub type Predecessors = FxHashMap<PuzzleState, (PuzzleState, Move)>;

/// Walks predecessor links back from `goal` until a state without an entry
/// (the start) and returns the moves in start-to-goal order.
pub fn reconstruct_path(came_from: &Predecessors, goal: &PuzzleState) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut current = *goal;
    while let Some(&(prev, mv)) = came_from.get(&current) {
        moves.push(mv);
        current = prev;
    }
    moves.reverse();
    moves
}
