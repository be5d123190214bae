use std::fmt;
use std::time::{Duration, Instant};

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::{debug, trace};

use crate::errors::PuzzleError;
use crate::heuristics::Heuristic;
use crate::options::SearchOptions;
use crate::state::{Move, PuzzleState};

use super::frontier::PriorityFrontier;
use super::path::{reconstruct_path, Predecessors};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    Solved,
    /// Frontier ran dry and no neighbour was ever cut by the depth cap.
    Exhausted,
    /// Frontier ran dry after the depth cap pruned at least one neighbour.
    DepthCapped,
    ExpansionLimit,
    TimedOut,
}

impl SearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Solved => "solved",
            SearchStatus::Exhausted => "exhausted",
            SearchStatus::DepthCapped => "depth_capped",
            SearchStatus::ExpansionLimit => "expansion_limit",
            SearchStatus::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct SearchResult {
    pub status: SearchStatus,
    /// Blank moves from start to goal; empty unless solved.
    pub moves: Vec<Move>,
    /// Distinct states finalized by the search.
    pub visited: usize,
    /// Frontier insertions and improvements.
    pub generated: u64,
    /// g-score of the goal when solved.
    pub cost: Option<u32>,
    pub cap_hit: bool,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.status == SearchStatus::Solved
    }
}

/// A* from `start` to `goal` with the default options (depth cap 80, no budgets).
pub fn astar<H>(start: &PuzzleState, heuristic: &H, goal: &PuzzleState) -> Result<SearchResult, PuzzleError>
where
    H: Heuristic + ?Sized,
{
    astar_with(start, heuristic, goal, &SearchOptions::default())
}

pub fn astar_with<H>(
    start: &PuzzleState,
    heuristic: &H,
    goal: &PuzzleState,
    options: &SearchOptions,
) -> Result<SearchResult, PuzzleError>
where
    H: Heuristic + ?Sized,
{
    if start.side() != goal.side() {
        return Err(PuzzleError::SizeMismatch { start: start.side(), goal: goal.side() });
    }

    let started = Instant::now();
    let deadline = options.timeout_ms.map(|ms| started + Duration::from_millis(ms));

    let mut g_score: FxHashMap<PuzzleState, u32> = FxHashMap::default();
    let mut came_from = Predecessors::default();
    let mut visited: FxHashSet<PuzzleState> = FxHashSet::default();
    let mut open = PriorityFrontier::new();
    let mut generated: u64 = 0;
    let mut cap_hit = false;

    let h0 = heuristic.estimate(start);
    g_score.insert(*start, 0);
    open.insert_or_improve(*start, h0);
    debug!(side = start.side(), h0, depth_cap = options.depth_cap, "search started");

    let status = loop {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                break SearchStatus::TimedOut;
            }
        }

        let Some((current, _)) = open.extract_min() else {
            break if cap_hit { SearchStatus::DepthCapped } else { SearchStatus::Exhausted };
        };

        // Re-inserted after being finalized; the earlier expansion stands.
        if visited.contains(&current) {
            continue;
        }
        if let Some(limit) = options.max_expansions {
            if visited.len() as u64 >= limit {
                break SearchStatus::ExpansionLimit;
            }
        }
        visited.insert(current);

        if current == *goal {
            break SearchStatus::Solved;
        }

        let Some(&g) = g_score.get(&current) else { continue };
        let tentative_g = g + 1;
        if tentative_g > options.depth_cap {
            if !cap_hit {
                trace!(g, depth_cap = options.depth_cap, "depth cap reached");
            }
            cap_hit = true;
            continue;
        }

        for (neighbour, mv) in current.neighbours() {
            let improves = g_score.get(&neighbour).map_or(true, |&old| tentative_g < old);
            if improves {
                g_score.insert(neighbour, tentative_g);
                let f = tentative_g + heuristic.estimate(&neighbour);
                open.insert_or_improve(neighbour, f);
                came_from.insert(neighbour, (current, mv));
                generated += 1;
            }
        }
    };

    let (moves, cost) = if status == SearchStatus::Solved {
        (reconstruct_path(&came_from, goal), g_score.get(goal).copied())
    } else {
        (Vec::new(), None)
    };
    let elapsed = started.elapsed();
    debug!(
        status = status.as_str(),
        visited = visited.len(),
        generated,
        path_len = moves.len(),
        cap_hit,
        elapsed_ms = elapsed.as_millis() as u64,
        "search finished"
    );

    Ok(SearchResult { status, moves, visited: visited.len(), generated, cost, cap_hit, elapsed })
}
