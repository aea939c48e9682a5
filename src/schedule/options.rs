use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How chunks are handed to workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Round-robin assignment fixed before any worker starts.
    #[default]
    Static,
    /// Workers pull the next pending chunk when they become idle.
    Dynamic,
}

impl FromStr for Policy {
    type Err = ConfigError;

    /// Accepts `static`/`dynamic` and the short CLI aliases `a1`/`a2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" | "a1" => Ok(Policy::Static),
            "dynamic" | "a2" => Ok(Policy::Dynamic),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Static => "static",
            Policy::Dynamic => "dynamic",
        })
    }
}

/// Options controlling a scheduling run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Requested number of chunks (>= 1); sets the chunk size.
    pub num_chunks: usize,
    /// Worker threads in the pool (>= 1).
    pub workers: usize,
    pub policy: Policy,
}

impl ScheduleOptions {
    /// `num_chunks` with the default worker count and static policy.
    pub fn new(num_chunks: usize) -> Self {
        Self {
            num_chunks,
            ..Default::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_chunks == 0 {
            return Err(ConfigError::ZeroChunks);
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            num_chunks: 1,
            workers: default_workers(),
            policy: Policy::Static,
        }
    }
}

/// Size of rayon's global pool, which honours `RAYON_NUM_THREADS`.
pub fn default_workers() -> usize {
    rayon::current_num_threads().max(1)
}
