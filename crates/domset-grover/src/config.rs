//! Search configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GroverResult;

/// Default number of shots.
pub const DEFAULT_SHOTS: u32 = 1024;

fn default_shots() -> u32 {
    DEFAULT_SHOTS
}

/// Run parameters that can be loaded from JSON.
///
/// ```json
/// { "shots": 2048, "iterations": 1, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of measurement shots.
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Grover iterations; the optimal count for the search space when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    /// Seed for shot sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            iterations: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> GroverResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> GroverResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Overlay values given explicitly elsewhere (CLI flags, environment).
    pub fn merge(
        mut self,
        shots: Option<u32>,
        iterations: Option<usize>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(shots) = shots {
            self.shots = shots;
        }
        if iterations.is_some() {
            self.iterations = iterations;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}
