//! Parallel work distribution for the Prewitt kernel.
//!
//! A run splits the image rows into fixed-size chunks ([`Partition`]) and
//! executes them on a dedicated pool of `P` worker threads under one of two
//! policies:
//!
//! - [`Policy::Static`]: chunk `k` goes to worker `k mod P`, decided up front.
//! - [`Policy::Dynamic`]: chunks are claimed from a shared queue on demand.
//!
//! Each worker owns a disjoint slice of the output grid for every chunk it
//! processes, so output writes need no synchronisation. Row attribution is
//! buffered per worker and merged into an [`AttributionLog`] once the pool
//! has been joined. Both policies produce identical output grids.
//!
//! A worker panic aborts the run: the partially written grid is discarded
//! and [`RunError::WorkerPanicked`] is returned.

pub mod attribution;
mod block;
mod dynamic_policy;
pub mod options;
pub mod partition;
mod static_policy;

pub use attribution::{AttributionLog, WorkerId, WorkerReport, WorkerRows};
pub use options::{default_workers, Policy, ScheduleOptions};
pub use partition::{chunk_size, Chunk, Partition};

use crate::edges::compute_row;
use crate::error::RunError;
use crate::image::Grid;
use block::{split_output, RowKernel};
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// Lifecycle of a [`Scheduler`]. There is no pause or restart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct ScheduleRun {
    /// Fully populated edge-intensity grid.
    pub output: Grid,
    pub log: AttributionLog,
    pub partition: Partition,
    pub workers: usize,
    pub policy: Policy,
    /// Wall time spent in the worker pool, excluding pool construction.
    pub elapsed_ms: f64,
}

/// Drives a single scheduling run with fixed options.
#[derive(Debug)]
pub struct Scheduler {
    options: ScheduleOptions,
    state: RunState,
}

impl Scheduler {
    pub fn new(options: ScheduleOptions) -> Self {
        Self {
            options,
            state: RunState::NotStarted,
        }
    }

    pub fn options(&self) -> &ScheduleOptions {
        &self.options
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Compute the Prewitt map of `input`.
    ///
    /// Configuration is validated before any worker starts. A scheduler runs
    /// once; further calls return [`RunError::AlreadyStarted`].
    pub fn run(&mut self, input: &Grid) -> Result<ScheduleRun, RunError> {
        self.run_with(input, &compute_row)
    }

    pub(crate) fn run_with<K: RowKernel>(
        &mut self,
        input: &Grid,
        kernel: &K,
    ) -> Result<ScheduleRun, RunError> {
        if self.state != RunState::NotStarted {
            return Err(RunError::AlreadyStarted);
        }
        self.options.validate()?;
        let partition = Partition::new(input.height(), self.options.num_chunks)?;
        let pool = build_pool(self.options.workers)?;
        debug!(
            "Scheduler::run policy={} workers={} height={} chunk_size={} chunks={}",
            self.options.policy,
            self.options.workers,
            input.height(),
            partition.chunk_size(),
            partition.len()
        );

        self.state = RunState::Running;
        let start = Instant::now();
        let result = execute(&pool, input, &partition, self.options.policy, kernel);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        self.state = if result.is_ok() {
            RunState::Completed
        } else {
            RunState::Failed
        };
        let (output, log) = result?;

        for report in log.report() {
            debug!(
                "Scheduler::run worker={} rows={} chunks={}",
                report.worker,
                log.rows(report.worker).len(),
                log.claimed_chunks(report.worker).len()
            );
        }

        Ok(ScheduleRun {
            output,
            log,
            partition,
            workers: self.options.workers,
            policy: self.options.policy,
            elapsed_ms,
        })
    }
}

/// Static run on the default worker count.
pub fn run_static(input: &Grid, num_chunks: usize) -> Result<(Grid, AttributionLog), RunError> {
    run_policy(input, num_chunks, Policy::Static)
}

/// Dynamic run on the default worker count.
pub fn run_dynamic(input: &Grid, num_chunks: usize) -> Result<(Grid, AttributionLog), RunError> {
    run_policy(input, num_chunks, Policy::Dynamic)
}

fn run_policy(
    input: &Grid,
    num_chunks: usize,
    policy: Policy,
) -> Result<(Grid, AttributionLog), RunError> {
    let options = ScheduleOptions::new(num_chunks).with_policy(policy);
    let run = Scheduler::new(options).run(input)?;
    Ok((run.output, run.log))
}

fn build_pool(workers: usize) -> Result<ThreadPool, RunError> {
    Ok(ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("prewitt-worker-{i}"))
        .build()?)
}

/// Output intensities reach 255 regardless of the input depth.
fn output_max_shades(input: &Grid) -> u16 {
    input.max_shades().max(u16::from(crate::edges::MAX_EDGE_INTENSITY))
}

fn execute<K: RowKernel>(
    pool: &ThreadPool,
    input: &Grid,
    partition: &Partition,
    policy: Policy,
    kernel: &K,
) -> Result<(Grid, AttributionLog), RunError> {
    let mut output = Grid::zeroed(input.width(), input.height(), output_max_shades(input));
    let blocks = split_output(partition, input.width(), output.data_mut());

    let buffers = catch_unwind(AssertUnwindSafe(|| match policy {
        Policy::Static => static_policy::execute(pool, input, blocks, kernel),
        Policy::Dynamic => dynamic_policy::execute(pool, input, blocks, kernel),
    }))
    .map_err(|payload| RunError::WorkerPanicked(panic_message(payload.as_ref())))?;

    let log = AttributionLog::from_workers(partition.chunk_size(), buffers);
    log.check_coverage(input.height())?;
    Ok((output, log))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests;
