use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use npuzzle_bench::config::{Args, Config};
use npuzzle_bench::experiment::{pick_start, report, run_trial};
use npuzzle_bench::results::ResultsWriter;

fn main() -> Result<()> {
    let args = Args::parse();

    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let cfg = Config::from_args(args)?;
    info!(
        core_version = %npuzzle_core::version(),
        size = cfg.size,
        trials = cfg.trials,
        depth_cap = cfg.options.depth_cap,
        "starting npuzzle-bench"
    );

    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut writer = cfg.out.as_ref().map(ResultsWriter::open).transpose()?;

    for i in 0..cfg.trials {
        let start = pick_start(&cfg, &mut rng)?;
        println!("---------Test {}---------", i + 1);
        print!("Puzzle:\n{}", start);
        let records = run_trial(&cfg, &start)?;
        for rec in &records {
            println!("{}", report(rec));
        }
        if let Some(w) = writer.as_mut() {
            w.append(&records)?;
            info!(path = %w.path().display(), lines = records.len(), "results appended");
        }
    }
    Ok(())
}
