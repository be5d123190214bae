use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::PuzzleError;
use crate::state::{check_side, Move, PuzzleState};

/// Retry cap for the shuffle-and-retest loop. Each shuffle is solvable with
/// probability 1/2, so hitting this means the RNG is broken.
pub const MAX_GENERATION_ATTEMPTS: u32 = 1_000;

pub fn goal_state(side: usize) -> Result<PuzzleState, PuzzleError> {
    PuzzleState::goal(side)
}

pub fn generate_final_state(side: usize) -> Result<PuzzleState, PuzzleError> {
    goal_state(side)
}

/// Uniformly shuffles `1..side²`, appends the blank, and retries until the
/// inversion count is even.
///
/// The even-parity rule only holds because the blank always ends up in the
/// last cell, the same cell it occupies in the canonical goal.
pub fn random_solvable<R: Rng + ?Sized>(side: usize, rng: &mut R) -> Result<PuzzleState, PuzzleError> {
    check_side(side)?;
    let cells = side * side;
    let mut tiles: Vec<u8> = (1..cells as u8).collect();
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        tiles.shuffle(rng);
        let mut candidate = tiles.clone();
        candidate.push(0);
        let state = PuzzleState::from_tiles(side, &candidate)?;
        if state.inversions() % 2 == 0 {
            return Ok(state);
        }
    }
    Err(PuzzleError::GenerationFailed { attempts: MAX_GENERATION_ATTEMPTS })
}

pub fn generate_random_solvable<R: Rng + ?Sized>(side: usize, rng: &mut R) -> Result<PuzzleState, PuzzleError> {
    random_solvable(side, rng)
}

/// Applies `steps` random legal blank moves to the goal. The optimal solution
/// of the result is at most `steps` long.
pub fn random_walk<R: Rng + ?Sized>(side: usize, steps: usize, rng: &mut R) -> Result<PuzzleState, PuzzleError> {
    let mut state = goal_state(side)?;
    for _ in 0..steps {
        loop {
            let Some(&mv) = Move::ALL.choose(rng) else { break };
            if let Some(next) = state.apply(mv) {
                state = next;
                break;
            }
        }
    }
    Ok(state)
}

pub fn generate_from_walk<R: Rng + ?Sized>(side: usize, steps: usize, rng: &mut R) -> Result<PuzzleState, PuzzleError> {
    random_walk(side, steps, rng)
}

/// Whether `state` can reach the canonical goal, for any blank position.
///
/// Odd sides need an even inversion count. Even sides need the inversion count
/// plus the blank's row (counted from the bottom, starting at 1) to be odd.
pub fn is_solvable(state: &PuzzleState) -> bool {
    let side = state.side();
    let inversions = state.inversions();
    if side % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (row, _) = state.position(state.blank_index());
        let row_from_bottom = side - row;
        (inversions + row_from_bottom) % 2 == 1
    }
}
