//! Dynamic scheduling: pending chunks sit in a shared lock-free queue and
//! each worker pops the next one whenever it is idle. A pop hands a chunk to
//! exactly one worker; which worker gets which chunk depends on timing.
use super::attribution::WorkerRows;
use super::block::{Block, RowKernel};
use crate::image::Grid;
use crossbeam::queue::SegQueue;
use rayon::ThreadPool;

pub(crate) fn execute<K: RowKernel>(
    pool: &ThreadPool,
    input: &Grid,
    blocks: Vec<Block<'_>>,
    kernel: &K,
) -> Vec<WorkerRows> {
    let pending = SegQueue::new();
    for block in blocks {
        pending.push(block);
    }

    pool.broadcast(|_| {
        let mut done = WorkerRows::default();
        while let Some(block) = pending.pop() {
            block.process(input, kernel, &mut done);
        }
        done
    })
}
