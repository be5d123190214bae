use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::PuzzleError;
use crate::state::{PuzzleState, MAX_TILES};

/// Lower bound on the number of moves from a state to the goal.
pub trait Heuristic {
    fn estimate(&self, state: &PuzzleState) -> u32;
}

impl<F> Heuristic for F
where
    F: Fn(&PuzzleState) -> u32,
{
    fn estimate(&self, state: &PuzzleState) -> u32 {
        self(state)
    }
}

/// Goal cell of every tile value, precomputed from the designated final state.
#[derive(Clone, Debug)]
pub struct GoalTable {
    goal: PuzzleState,
    rows: [u8; MAX_TILES],
    cols: [u8; MAX_TILES],
}

impl GoalTable {
    pub fn new(goal: PuzzleState) -> Self {
        let mut rows = [0u8; MAX_TILES];
        let mut cols = [0u8; MAX_TILES];
        for (i, &v) in goal.tiles().iter().enumerate() {
            let (r, c) = goal.position(i);
            rows[v as usize] = r as u8;
            cols[v as usize] = c as u8;
        }
        Self { goal, rows, cols }
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.goal
    }

    #[inline]
    pub fn goal_position(&self, value: u8) -> (usize, usize) {
        (self.rows[value as usize] as usize, self.cols[value as usize] as usize)
    }

    pub fn misplaced(&self, state: &PuzzleState) -> u32 {
        state
            .tiles()
            .iter()
            .zip(self.goal.tiles())
            .filter(|&(&v, &g)| v != 0 && v != g)
            .count() as u32
    }

    pub fn manhattan(&self, state: &PuzzleState) -> u32 {
        let mut distance = 0usize;
        for (i, &v) in state.tiles().iter().enumerate() {
            if v == 0 {
                continue;
            }
            let (r, c) = state.position(i);
            let (gr, gc) = self.goal_position(v);
            distance += r.abs_diff(gr) + c.abs_diff(gc);
        }
        distance as u32
    }

    /// Number of linear conflicts in rows plus columns.
    ///
    /// Each line is scanned once in order. Among tiles whose goal lies on that
    /// line, a tile counts as conflicted when its goal coordinate along the line
    /// is not strictly above the running maximum. A tile sitting in both its goal
    /// row and goal column may be counted by both scans.
    pub fn linear_conflicts(&self, state: &PuzzleState) -> u32 {
        let side = state.side();
        let tiles = state.tiles();
        let mut conflicts = 0u32;

        for row in 0..side {
            let mut max_goal_col: Option<usize> = None;
            for col in 0..side {
                let v = tiles[row * side + col];
                if v == 0 {
                    continue;
                }
                let (gr, gc) = self.goal_position(v);
                if gr != row {
                    continue;
                }
                match max_goal_col {
                    Some(m) if gc <= m => conflicts += 1,
                    _ => max_goal_col = Some(gc),
                }
            }
        }

        for col in 0..side {
            let mut max_goal_row: Option<usize> = None;
            for row in 0..side {
                let v = tiles[row * side + col];
                if v == 0 {
                    continue;
                }
                let (gr, gc) = self.goal_position(v);
                if gc != col {
                    continue;
                }
                match max_goal_row {
                    Some(m) if gr <= m => conflicts += 1,
                    _ => max_goal_row = Some(gr),
                }
            }
        }

        conflicts
    }

    /// Manhattan distance plus two moves per linear conflict.
    pub fn manhattan_linear_conflict(&self, state: &PuzzleState) -> u32 {
        self.manhattan(state) + 2 * self.linear_conflicts(state)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    Misplaced,
    Manhattan,
    #[serde(alias = "linear_conflict")]
    ManhattanLinear,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 3] =
        [HeuristicKind::Misplaced, HeuristicKind::Manhattan, HeuristicKind::ManhattanLinear];

    /// Name written to result files.
    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Misplaced => "misplaced",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::ManhattanLinear => "manhattan_linear",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HeuristicKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "misplaced" => Ok(HeuristicKind::Misplaced),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "manhattan_linear" | "linear_conflict" | "manhattan_linear_conflict" => {
                Ok(HeuristicKind::ManhattanLinear)
            }
            _ => Err(PuzzleError::Parse { what: "heuristic", value: s.to_string() }),
        }
    }
}

/// A heuristic kind bound to a goal table.
#[derive(Clone, Debug)]
pub struct Evaluator {
    kind: HeuristicKind,
    table: GoalTable,
}

impl Evaluator {
    pub fn new(kind: HeuristicKind, goal: PuzzleState) -> Self {
        Self { kind, table: GoalTable::new(goal) }
    }

    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    pub fn table(&self) -> &GoalTable {
        &self.table
    }
}

impl Heuristic for Evaluator {
    fn estimate(&self, state: &PuzzleState) -> u32 {
        match self.kind {
            HeuristicKind::Misplaced => self.table.misplaced(state),
            HeuristicKind::Manhattan => self.table.manhattan(state),
            HeuristicKind::ManhattanLinear => self.table.manhattan_linear_conflict(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Move;

    fn table(side: usize) -> GoalTable {
        GoalTable::new(PuzzleState::goal(side).unwrap())
    }

    fn state(side: usize, tiles: &[u8]) -> PuzzleState {
        PuzzleState::from_tiles(side, tiles).unwrap()
    }

    #[test]
    fn all_heuristics_vanish_at_goal() {
        for side in 2..=6 {
            let goal = PuzzleState::goal(side).unwrap();
            for kind in HeuristicKind::ALL {
                assert_eq!(Evaluator::new(kind, goal).estimate(&goal), 0, "{} side {}", kind, side);
            }
        }
    }

    #[test]
    fn single_slide_from_goal_costs_one() {
        let t = table(4);
        let s = state(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15]);
        assert_eq!(t.misplaced(&s), 1);
        assert_eq!(t.manhattan(&s), 1);
        assert_eq!(t.linear_conflicts(&s), 0);
        assert_eq!(t.manhattan_linear_conflict(&s), 1);
    }

    #[test]
    fn row_swap_adds_one_conflict() {
        let t = table(4);
        let s = state(4, &[2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 0]);
        assert_eq!(t.misplaced(&s), 2);
        assert_eq!(t.manhattan(&s), 2);
        assert_eq!(t.linear_conflicts(&s), 1);
        assert_eq!(t.manhattan_linear_conflict(&s), 4);
    }

    #[test]
    fn column_swap_adds_one_conflict() {
        let t = table(3);
        let s = state(3, &[4, 2, 3, 1, 5, 6, 7, 8, 0]);
        assert_eq!(t.linear_conflicts(&s), 1);
        assert_eq!(t.manhattan_linear_conflict(&s), 4);
    }

    #[test]
    fn tile_in_place_is_counted_by_both_scans() {
        // 5 sits on its goal cell but follows 6 in its row and 8 in its column.
        let t = table(3);
        let s = state(3, &[1, 8, 3, 6, 5, 4, 7, 2, 0]);
        assert_eq!(t.manhattan(&s), 8);
        assert_eq!(t.linear_conflicts(&s), 4);
        assert_eq!(t.manhattan_linear_conflict(&s), 16);
    }

    #[test]
    fn manhattan_changes_by_one_per_move() {
        let t = table(4);
        let mut s = PuzzleState::goal(4).unwrap();
        let walk = [Move::Up, Move::Left, Move::Left, Move::Up, Move::Right, Move::Down, Move::Left, Move::Up];
        for m in walk {
            let next = s.apply(m).unwrap();
            let (a, b) = (t.manhattan(&s), t.manhattan(&next));
            assert_eq!(a.abs_diff(b), 1);
            assert!(t.manhattan(&next) <= t.manhattan_linear_conflict(&next));
            s = next;
        }
    }

    #[test]
    fn goal_table_follows_custom_goal() {
        let goal = state(2, &[0, 1, 2, 3]);
        let t = GoalTable::new(goal);
        assert_eq!(t.goal_position(0), (0, 0));
        assert_eq!(t.goal_position(3), (1, 1));
        assert_eq!(t.manhattan(&goal), 0);
        assert_eq!(t.misplaced(&state(2, &[1, 0, 2, 3])), 1);
    }

    #[test]
    fn closures_are_heuristics() {
        let zero = |_: &PuzzleState| 0u32;
        assert_eq!(zero.estimate(&PuzzleState::goal(3).unwrap()), 0);
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in HeuristicKind::ALL {
            assert_eq!(kind.name().parse::<HeuristicKind>().unwrap(), kind);
        }
        assert_eq!("linear-conflict".parse::<HeuristicKind>().unwrap(), HeuristicKind::ManhattanLinear);
        assert!("euclid".parse::<HeuristicKind>().is_err());
        let k: HeuristicKind = serde_json::from_str("\"manhattan_linear\"").unwrap();
        assert_eq!(k, HeuristicKind::ManhattanLinear);
    }
}
