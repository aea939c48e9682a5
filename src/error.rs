//! Error types for grid construction, scheduling runs and raster I/O.
//!
//! Configuration problems are reported before any worker starts. Failures
//! during a run abort the whole run; no partial output is ever returned.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected inputs or scheduling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("number of chunks must be at least 1")]
    ZeroChunks,
    #[error("invalid chunk count {0:?}: expected a positive integer")]
    InvalidChunkCount(String),
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("invalid worker count {0:?}: expected a positive integer")]
    InvalidWorkerCount(String),
    #[error("unsupported grid dimensions {width}x{height}: each side must be in 1..={max}")]
    Dimensions {
        width: usize,
        height: usize,
        max: usize,
    },
    #[error("maximum shade value must be at least 1")]
    ZeroMaxShades,
    #[error("expected {expected} samples for the grid, got {actual}")]
    SampleCount { expected: usize, actual: usize },
    #[error("sample {value} at row {row}, column {col} exceeds maximum shade {max_shades}")]
    SampleOutOfRange {
        row: usize,
        col: usize,
        value: u16,
        max_shades: u16,
    },
    #[error("unknown scheduling policy {0:?}: expected static, dynamic, a1 or a2")]
    UnknownPolicy(String),
    #[error("{0}")]
    Usage(String),
}

/// A scheduling run that did not complete.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("worker panicked while processing a chunk: {0}")]
    WorkerPanicked(String),
    #[error("run finished with incomplete attribution: {missing} rows missing, {duplicated} rows duplicated")]
    IncompleteCoverage { missing: usize, duplicated: usize },
    #[error("scheduler has already been started")]
    AlreadyStarted,
}

/// Raster and JSON file access.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not a valid plain PGM image: {0}")]
    InvalidPgm(String),
    #[error("image codec failed for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("JSON error for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Top-level error for callers that drive load, run and save together.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Io(#[from] IoError),
}
