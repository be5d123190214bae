use anyhow::Result;
use npuzzle_core::generator::{random_solvable, random_walk};
use npuzzle_core::{astar_with, Evaluator, HeuristicKind, Move, PuzzleState, SearchStatus};
use rand::Rng;
use tracing::{info, warn};

use crate::config::{Config, StartSource};

/// Outcome of one heuristic on one puzzle.
#[derive(Clone, Debug, PartialEq)]
pub struct TrialRecord {
    pub heuristic: HeuristicKind,
    pub status: SearchStatus,
    pub moves: Vec<Move>,
    pub visited: usize,
    pub duration_secs: f64,
}

impl TrialRecord {
    pub fn path_len(&self) -> usize {
        self.moves.len()
    }
}

pub fn pick_start<R: Rng + ?Sized>(cfg: &Config, rng: &mut R) -> Result<PuzzleState> {
    let state = match &cfg.source {
        StartSource::Shuffle => random_solvable(cfg.size, rng)?,
        StartSource::Walk(k) => random_walk(cfg.size, *k, rng)?,
        StartSource::Fixed(s) => *s,
    };
    Ok(state)
}

/// Runs every configured heuristic against `start`, in order.
pub fn run_trial(cfg: &Config, start: &PuzzleState) -> Result<Vec<TrialRecord>> {
    let goal = PuzzleState::goal(cfg.size)?;
    let mut records = Vec::with_capacity(cfg.heuristics.len());
    for &kind in &cfg.heuristics {
        let h = Evaluator::new(kind, goal);
        let res = astar_with(start, &h, &goal, &cfg.options)?;
        if res.found() {
            info!(heuristic = kind.name(), path_len = res.moves.len(), visited = res.visited, "solved");
        } else {
            warn!(heuristic = kind.name(), status = res.status.as_str(), visited = res.visited, "no solution");
        }
        records.push(TrialRecord {
            heuristic: kind,
            status: res.status,
            moves: res.moves,
            visited: res.visited,
            duration_secs: res.elapsed.as_secs_f64(),
        });
    }
    Ok(records)
}

pub fn report(rec: &TrialRecord) -> String {
    let moves: Vec<&str> = rec.moves.iter().map(|m| m.as_str()).collect();
    let mut out = format!("\nHeuristic: {}\n", rec.heuristic);
    if rec.status != SearchStatus::Solved {
        out.push_str(&format!("Status: {}\n", rec.status));
    }
    out.push_str(&format!("Solution (moves): [{}]\n", moves.join(", ")));
    out.push_str(&format!("Steps to goal: {}\n", rec.path_len()));
    out.push_str(&format!("States visited: {}\n", rec.visited));
    out.push_str(&format!("Run time: {:.4} s", rec.duration_secs));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use npuzzle_core::SearchOptions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(source: StartSource) -> Config {
        Config {
            size: 3,
            trials: 1,
            heuristics: HeuristicKind::ALL.to_vec(),
            source,
            seed: Some(9),
            options: SearchOptions::default(),
            out: None,
        }
    }

    #[test]
    fn trial_runs_each_heuristic_in_order() {
        let start: PuzzleState = "1,2,3,4,5,6,0,7,8".parse().unwrap();
        let cfg = config(StartSource::Fixed(start));
        let records = run_trial(&cfg, &start).unwrap();
        let kinds: Vec<HeuristicKind> = records.iter().map(|r| r.heuristic).collect();
        assert_eq!(kinds, HeuristicKind::ALL.to_vec());
        for r in &records {
            assert_eq!(r.status, SearchStatus::Solved);
            assert_eq!(r.moves, vec![Move::Right, Move::Right]);
        }
    }

    #[test]
    fn pick_start_honours_source() {
        let mut rng = StdRng::seed_from_u64(9);
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(pick_start(&config(StartSource::Walk(0)), &mut rng).unwrap(), goal);
        assert_eq!(pick_start(&config(StartSource::Fixed(goal)), &mut rng).unwrap(), goal);
        let shuffled = pick_start(&config(StartSource::Shuffle), &mut rng).unwrap();
        assert_eq!(shuffled.blank_index(), 8);
    }

    #[test]
    fn report_lists_moves_and_counts() {
        let rec = TrialRecord {
            heuristic: HeuristicKind::Manhattan,
            status: SearchStatus::Solved,
            moves: vec![Move::Right],
            visited: 2,
            duration_secs: 0.0,
        };
        let text = report(&rec);
        assert!(text.contains("Heuristic: manhattan"));
        assert!(text.contains("[RIGHT]"));
        assert!(text.contains("Steps to goal: 1"));
        assert!(text.contains("States visited: 2"));
    }
}
