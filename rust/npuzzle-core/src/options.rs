use serde::{Deserialize, Serialize};

use crate::errors::PuzzleError;

pub const DEFAULT_DEPTH_CAP: u32 = 80;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Neighbours whose g-score would exceed this are never generated.
    pub depth_cap: u32,
    /// Stop after this many states have been finalized.
    pub max_expansions: Option<u64>,
    /// Wall-clock budget, checked once per loop iteration.
    pub timeout_ms: Option<u64>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { depth_cap: DEFAULT_DEPTH_CAP, max_expansions: None, timeout_ms: None }
    }
}

impl SearchOptions {
    pub fn from_json(text: &str) -> Result<Self, PuzzleError> {
        serde_json::from_str(text).map_err(|e| PuzzleError::Options(e.to_string()))
    }

    pub fn with_depth_cap(mut self, depth_cap: u32) -> Self {
        self.depth_cap = depth_cap;
        self
    }

    /// True when neither an expansion nor a time budget is set.
    pub fn unbounded(&self) -> bool {
        self.max_expansions.is_none() && self.timeout_ms.is_none()
    }
}
