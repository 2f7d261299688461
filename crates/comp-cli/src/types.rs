//! Result types shared by the commands and the terminal summary.

use std::path::PathBuf;

use serde::Serialize;

/// One artifact written during a run.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    pub name: String,
    pub records: usize,
    pub path: PathBuf,
}

/// Outcome of one command, printed as the terminal summary and
/// serialized into `run_summary.json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunResult {
    pub output_dir: PathBuf,
    pub artifacts: Vec<ArtifactSummary>,
    /// Per-record misses surfaced to the operator; never fatal.
    pub warnings: Vec<String>,
}

impl RunResult {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }

    pub fn record_artifact(&mut self, name: &str, records: usize, path: PathBuf) {
        self.artifacts.push(ArtifactSummary {
            name: name.to_string(),
            records,
            path,
        });
    }
}
