use crate::error::IoError;
use crate::schedule::{default_workers, Policy, ScheduleOptions};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the `prewitt` tool needs for one run.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Optional JSON run report destination.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub num_chunks: usize,
    /// `None` uses rayon's default thread count.
    pub workers: Option<usize>,
    pub policy: Policy,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            num_chunks: 1,
            workers: None,
            policy: Policy::Static,
        }
    }
}

impl ScheduleConfig {
    pub fn to_options(&self) -> ScheduleOptions {
        ScheduleOptions::new(self.num_chunks)
            .with_workers(self.workers.unwrap_or_else(default_workers))
            .with_policy(self.policy)
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, IoError> {
    let data = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })
}
