//! Checks the heuristics and the search against exact distances on the 8-puzzle.

use std::collections::{HashMap, VecDeque};

use npuzzle_core::{astar, Evaluator, Heuristic, HeuristicKind, PuzzleState};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Breadth-first distances from `goal` to every state of its component.
fn exact_distances(goal: PuzzleState) -> HashMap<PuzzleState, u32> {
    let mut dist = HashMap::new();
    let mut queue = VecDeque::new();
    dist.insert(goal, 0u32);
    queue.push_back(goal);
    while let Some(s) = queue.pop_front() {
        let d = dist[&s];
        for (n, _) in s.neighbours() {
            if !dist.contains_key(&n) {
                dist.insert(n, d + 1);
                queue.push_back(n);
            }
        }
    }
    dist
}

#[test]
fn eight_puzzle_component_has_expected_size() {
    let dist = exact_distances(PuzzleState::goal(3).unwrap());
    assert_eq!(dist.len(), 181_440);
    assert_eq!(dist.values().copied().max(), Some(31));
}

#[test]
fn heuristics_never_overestimate_on_eight_puzzle() {
    let goal = PuzzleState::goal(3).unwrap();
    let dist = exact_distances(goal);
    for kind in HeuristicKind::ALL {
        let h = Evaluator::new(kind, goal);
        for (state, &d) in &dist {
            let est = h.estimate(state);
            assert!(est <= d, "{} overestimates {:?}: {} > {}", kind, state, est, d);
        }
    }
}

#[test]
fn linear_conflict_dominates_manhattan() {
    let goal = PuzzleState::goal(3).unwrap();
    let dist = exact_distances(goal);
    let manhattan = Evaluator::new(HeuristicKind::Manhattan, goal);
    let linear = Evaluator::new(HeuristicKind::ManhattanLinear, goal);
    for state in dist.keys() {
        assert!(manhattan.estimate(state) <= linear.estimate(state));
    }
}

#[test]
fn astar_matches_breadth_first_optimum() {
    let goal = PuzzleState::goal(3).unwrap();
    let dist = exact_distances(goal);
    let mut states: Vec<PuzzleState> = dist.keys().copied().collect();
    // HashMap order is random; sort before sampling so the seed fixes the sample.
    states.sort_by(|a, b| a.tiles().cmp(b.tiles()));
    let mut rng = StdRng::seed_from_u64(2024);
    let sample: Vec<PuzzleState> = states.choose_multiple(&mut rng, 20).copied().collect();

    for kind in HeuristicKind::ALL {
        let h = Evaluator::new(kind, goal);
        for start in &sample {
            let res = astar(start, &h, &goal).unwrap();
            assert!(res.found(), "{} failed on {:?}", kind, start);
            assert_eq!(res.moves.len() as u32, dist[start], "{} suboptimal on {:?}", kind, start);
            assert_eq!(res.cost, Some(res.moves.len() as u32));
        }
    }
}

#[test]
fn stronger_heuristics_visit_fewer_states() {
    let goal = PuzzleState::goal(3).unwrap();
    let start: PuzzleState = "8,6,7,2,5,4,3,0,1".parse().unwrap();
    let visited: Vec<usize> = HeuristicKind::ALL
        .iter()
        .map(|&k| astar(&start, &Evaluator::new(k, goal), &goal).unwrap().visited)
        .collect();
    assert!(visited[0] >= visited[1], "misplaced {} < manhattan {}", visited[0], visited[1]);
    assert!(visited[1] >= visited[2], "manhattan {} < linear {}", visited[1], visited[2]);
}
