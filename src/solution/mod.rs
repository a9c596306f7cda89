//! Serializable planner results.
//!
//! A report is intended to be **stable** (it records the mode and format
//! version alongside each result) and **diffable** (JSON with one record per
//! puzzle), so benchmark sweeps can be archived and compared across planner
//! changes. See `src/bin/benchmark_rgd.rs` for the producing tool.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

pub const FORMAT_VERSION: u32 = 1;

/// The outcome of planning one puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRecord {
    /// Puzzle file name, without directory.
    pub puzzle: String,
    /// Planner mode name, e.g. `"RGD"`.
    pub mode: String,
    /// Whether a plan was found. `false` means the goal is provably
    /// unreachable; it is not an error.
    pub solved: bool,
    /// The plan in `{L,R,U,D}` character form; empty when unsolved.
    pub plan: String,
    /// States inserted into the visited set during the search.
    pub visited_states: u64,
    pub runtime_ms: u64,
}

/// A set of planning outcomes produced by one benchmark sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    pub format_version: u32,
    pub records: Vec<PlanRecord>,
}

impl PlanReport {
    pub fn new(records: Vec<PlanRecord>) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            records,
        }
    }
}

pub fn save_report(path: impl AsRef<Path>, report: &PlanReport) -> Result<(), PlannerError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report).map_err(|e| PlannerError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| PlannerError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}

pub fn load_report(path: impl AsRef<Path>) -> Result<PlanReport, PlannerError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| PlannerError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;
    serde_json::from_str(&json).map_err(|e| PlannerError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}
