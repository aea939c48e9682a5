//! Per-worker record of processed rows.
//!
//! Workers fill private [`WorkerRows`] buffers during a run; the buffers are
//! merged into an [`AttributionLog`] after every worker has been joined, so
//! nothing on the hot path takes a lock. Once returned from a run the log is
//! read-only.
use crate::error::RunError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Worker slot of the pool that executed the rows.
pub type WorkerId = usize;

/// Rows and chunks one worker completed, in completion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerRows {
    pub rows: Vec<usize>,
    pub chunks: Vec<usize>,
}

impl WorkerRows {
    pub fn with_capacity(rows: usize) -> Self {
        Self {
            rows: Vec::with_capacity(rows),
            chunks: Vec::new(),
        }
    }
}

/// Chunk starts attributed to one worker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerReport {
    pub worker: WorkerId,
    pub chunk_starts: Vec<usize>,
}

/// Mapping from worker to the ordered rows (and chunk indices) it processed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributionLog {
    chunk_size: usize,
    entries: BTreeMap<WorkerId, WorkerRows>,
}

impl AttributionLog {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            entries: BTreeMap::new(),
        }
    }

    /// Merge joined worker buffers; index `i` of `buffers` is worker `i`.
    ///
    /// Workers that processed nothing get no entry.
    pub fn from_workers(chunk_size: usize, buffers: Vec<WorkerRows>) -> Self {
        let entries = buffers
            .into_iter()
            .enumerate()
            .filter(|(_, buf)| !buf.rows.is_empty())
            .collect();
        Self {
            chunk_size,
            entries,
        }
    }

    /// Append `row` to `worker`'s sequence.
    pub fn record(&mut self, worker: WorkerId, row: usize) {
        self.entries.entry(worker).or_default().rows.push(row);
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Workers with at least one row, ascending.
    pub fn workers(&self) -> impl Iterator<Item = WorkerId> + '_ {
        self.entries.keys().copied()
    }

    pub fn rows(&self, worker: WorkerId) -> &[usize] {
        self.entries
            .get(&worker)
            .map_or(&[][..], |entry| entry.rows.as_slice())
    }

    pub fn claimed_chunks(&self, worker: WorkerId) -> &[usize] {
        self.entries
            .get(&worker)
            .map_or(&[][..], |entry| entry.chunks.as_slice())
    }

    pub fn total_rows(&self) -> usize {
        self.entries.values().map(|e| e.rows.len()).sum()
    }

    /// Per worker in ascending id order, every `chunk_size`-th recorded row.
    pub fn report(&self) -> Vec<WorkerReport> {
        let step = self.chunk_size.max(1);
        self.entries
            .iter()
            .map(|(&worker, entry)| WorkerReport {
                worker,
                chunk_starts: entry.rows.iter().step_by(step).copied().collect(),
            })
            .collect()
    }

    /// Check that rows `0..height` each appear exactly once.
    pub fn check_coverage(&self, height: usize) -> Result<(), RunError> {
        let mut seen = vec![0u32; height];
        let mut stray = 0usize;
        for entry in self.entries.values() {
            for &row in &entry.rows {
                match seen.get_mut(row) {
                    Some(count) => *count += 1,
                    None => stray += 1,
                }
            }
        }
        let missing = seen.iter().filter(|&&c| c == 0).count();
        let duplicated = seen.iter().filter(|&&c| c > 1).count() + stray;
        if missing == 0 && duplicated == 0 {
            Ok(())
        } else {
            Err(RunError::IncompleteCoverage {
                missing,
                duplicated,
            })
        }
    }
}
