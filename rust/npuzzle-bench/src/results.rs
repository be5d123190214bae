use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use npuzzle_core::HeuristicKind;

use crate::experiment::TrialRecord;

/// One parsed result line: `<heuristic> <path_length> <visited> <seconds>`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultLine {
    pub heuristic: HeuristicKind,
    pub path_len: usize,
    pub visited: usize,
    pub duration_secs: f64,
}

pub fn format_line(rec: &TrialRecord) -> String {
    format!("{} {} {} {}", rec.heuristic.name(), rec.path_len(), rec.visited, rec.duration_secs)
}

pub fn parse_line(line: &str) -> Result<ResultLine> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [heuristic, path_len, visited, secs] = fields.as_slice() else {
        return Err(anyhow!("expected 4 fields, got {}: {:?}", fields.len(), line));
    };
    Ok(ResultLine {
        heuristic: heuristic.parse()?,
        path_len: path_len.parse().context("path length")?,
        visited: visited.parse().context("visited count")?,
        duration_secs: secs.parse().context("duration")?,
    })
}

/// Append-only writer; existing lines are never touched.
pub struct ResultsWriter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl ResultsWriter {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening results file {}", path.display()))?;
        Ok(Self { path, out: BufWriter::new(file) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, records: &[TrialRecord]) -> Result<()> {
        for rec in records {
            writeln!(self.out, "{}", format_line(rec))
                .with_context(|| format!("writing {}", self.path.display()))?;
        }
        self.out.flush().with_context(|| format!("flushing {}", self.path.display()))
    }
}
