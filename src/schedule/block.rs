//! Units of work handed to workers: a chunk plus its slice of the output.
use super::attribution::WorkerRows;
use super::partition::{Chunk, Partition};
use crate::image::Grid;

/// Per-row kernel run by workers; writes one output row.
pub(crate) trait RowKernel: Fn(&Grid, usize, &mut [u16]) + Sync {}

impl<F: Fn(&Grid, usize, &mut [u16]) + Sync> RowKernel for F {}

/// A chunk with exclusive access to its output rows.
pub(crate) struct Block<'a> {
    pub chunk: Chunk,
    out: &'a mut [u16],
}

impl Block<'_> {
    /// Run `kernel` over every row in increasing order, recording each row
    /// once it is written.
    pub fn process<K: RowKernel>(self, input: &Grid, kernel: &K, done: &mut WorkerRows) {
        done.chunks.push(self.chunk.index);
        let width = input.width();
        for (row, out_row) in self.chunk.rows().zip(self.out.chunks_mut(width)) {
            kernel(input, row, out_row);
            done.rows.push(row);
        }
    }
}

/// Split `out` into write-disjoint blocks following `partition`.
pub(crate) fn split_output<'a>(
    partition: &Partition,
    width: usize,
    out: &'a mut [u16],
) -> Vec<Block<'a>> {
    out.chunks_mut(partition.chunk_size() * width)
        .zip(partition.chunks())
        .map(|(out, chunk)| Block { chunk, out })
        .collect()
}
