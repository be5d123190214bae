use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use npuzzle_core::{HeuristicKind, PuzzleState, SearchOptions, DEFAULT_SIDE};

#[derive(Parser, Debug)]
#[command(name = "npuzzle-bench", version, about = "Benchmark A* heuristics on the N-puzzle")]
pub struct Args {
    /// Board side length
    #[arg(long, env = "NPUZZLE_SIZE", default_value_t = DEFAULT_SIDE)]
    pub size: usize,

    /// Number of puzzles to solve
    #[arg(long, default_value_t = 1)]
    pub trials: usize,

    /// Heuristic to run on every puzzle; repeat for several
    #[arg(long = "heuristic", value_name = "NAME")]
    pub heuristics: Vec<HeuristicKind>,

    /// Build puzzles by K random blank moves from the goal instead of shuffling
    #[arg(long, value_name = "K", conflicts_with = "start")]
    pub walk: Option<usize>,

    /// Solve this exact board (comma separated tiles, 0 = blank)
    #[arg(long, value_name = "TILES")]
    pub start: Option<PuzzleState>,

    /// RNG seed for reproducible puzzles
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with search options
    #[arg(long = "options", value_name = "PATH")]
    pub options_path: Option<PathBuf>,

    #[arg(long)]
    pub depth_cap: Option<u32>,

    #[arg(long)]
    pub max_expansions: Option<u64>,

    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Append one result line per (puzzle, heuristic) to this file
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StartSource {
    Shuffle,
    Walk(usize),
    Fixed(PuzzleState),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub size: usize,
    pub trials: usize,
    pub heuristics: Vec<HeuristicKind>,
    pub source: StartSource,
    pub seed: Option<u64>,
    pub options: SearchOptions,
    pub out: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        PuzzleState::goal(args.size).with_context(|| format!("unsupported --size {}", args.size))?;

        let mut options = match &args.options_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading options file {}", path.display()))?;
                SearchOptions::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => SearchOptions::default(),
        };
        if let Some(cap) = args.depth_cap {
            options.depth_cap = cap;
        }
        if args.max_expansions.is_some() {
            options.max_expansions = args.max_expansions;
        }
        if args.timeout_ms.is_some() {
            options.timeout_ms = args.timeout_ms;
        }

        let source = match (args.start, args.walk) {
            (Some(state), _) => {
                if state.side() != args.size {
                    bail!("--start has side {} but --size is {}", state.side(), args.size);
                }
                StartSource::Fixed(state)
            }
            (None, Some(k)) => StartSource::Walk(k),
            (None, None) => StartSource::Shuffle,
        };

        let heuristics = if args.heuristics.is_empty() {
            vec![HeuristicKind::ManhattanLinear, HeuristicKind::Manhattan]
        } else {
            args.heuristics
        };

        Ok(Self {
            size: args.size,
            trials: args.trials,
            heuristics,
            source,
            seed: args.seed,
            options,
            out: args.out,
        })
    }
}
