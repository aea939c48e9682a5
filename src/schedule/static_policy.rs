//! Static scheduling: chunk `k` belongs to worker `k mod P`, fixed before the
//! pool starts. An early finisher idles; it never takes another worker's chunk.
use super::attribution::WorkerRows;
use super::block::{Block, RowKernel};
use crate::image::Grid;
use rayon::ThreadPool;
use std::sync::Mutex;

/// Bucket `blocks` round-robin over `workers`, preserving chunk order per bucket.
pub(crate) fn assign_round_robin(blocks: Vec<Block<'_>>, workers: usize) -> Vec<Vec<Block<'_>>> {
    let mut assigned: Vec<Vec<Block<'_>>> = (0..workers).map(|_| Vec::new()).collect();
    for block in blocks {
        assigned[block.chunk.index % workers].push(block);
    }
    assigned
}

/// Run every block on its pre-assigned pool thread; returns one buffer per thread.
pub(crate) fn execute<K: RowKernel>(
    pool: &ThreadPool,
    input: &Grid,
    blocks: Vec<Block<'_>>,
    kernel: &K,
) -> Vec<WorkerRows> {
    let workers = pool.current_num_threads();
    let slots: Vec<Mutex<Vec<Block<'_>>>> = assign_round_robin(blocks, workers)
        .into_iter()
        .map(Mutex::new)
        .collect();

    pool.broadcast(|ctx| {
        // Each slot is taken exactly once, by the thread with the same index.
        let mine = slots
            .get(ctx.index())
            .map(|slot| match slot.lock() {
                Ok(mut guard) => std::mem::take(&mut *guard),
                Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
            })
            .unwrap_or_default();
        let mut done = WorkerRows::with_capacity(mine.iter().map(|b| b.chunk.len()).sum());
        for block in mine {
            block.process(input, kernel, &mut done);
        }
        done
    })
}
