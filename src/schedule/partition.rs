//! Row partitioning into fixed-size chunks.
use crate::error::ConfigError;
use std::ops::Range;

/// Rows per chunk for `height` rows split `num_chunks` ways: `ceil(height / num_chunks)`.
///
/// When `num_chunks > height` every chunk holds a single row and only
/// `height` chunks exist; no empty chunk is ever produced.
pub fn chunk_size(height: usize, num_chunks: usize) -> Result<usize, ConfigError> {
    if num_chunks == 0 {
        return Err(ConfigError::ZeroChunks);
    }
    if height == 0 {
        return Err(ConfigError::Dimensions {
            width: 0,
            height,
            max: crate::image::MAX_DIMENSION,
        });
    }
    Ok(height.div_ceil(num_chunks))
}

/// Contiguous half-open row range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in top-to-bottom order.
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The chunk layout of `[0, height)` for a requested chunk count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    height: usize,
    chunk_size: usize,
    chunk_count: usize,
}

impl Partition {
    pub fn new(height: usize, num_chunks: usize) -> Result<Self, ConfigError> {
        let chunk_size = chunk_size(height, num_chunks)?;
        Ok(Self {
            height,
            chunk_size,
            chunk_count: height.div_ceil(chunk_size),
        })
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of non-empty chunks; may be below the requested count.
    #[inline]
    pub fn len(&self) -> usize {
        self.chunk_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunk_count == 0
    }

    pub fn chunk(&self, index: usize) -> Option<Chunk> {
        (index < self.chunk_count).then(|| self.chunk_at(index))
    }

    pub fn chunks(&self) -> impl ExactSizeIterator<Item = Chunk> + '_ {
        (0..self.chunk_count).map(move |i| self.chunk_at(i))
    }

    fn chunk_at(&self, index: usize) -> Chunk {
        let start = index * self.chunk_size;
        Chunk {
            index,
            start,
            end: (start + self.chunk_size).min(self.height),
        }
    }

    /// Chunk that owns `row`, if the row is in range.
    pub fn chunk_of(&self, row: usize) -> Option<Chunk> {
        (row < self.height)
            .then(|| self.chunk(row / self.chunk_size))
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_size_is_ceiling_division() {
        assert_eq!(chunk_size(10, 3).unwrap(), 4);
        assert_eq!(chunk_size(9, 3).unwrap(), 3);
        assert_eq!(chunk_size(1, 1).unwrap(), 1);
        assert_eq!(chunk_size(7, 100).unwrap(), 1);
    }

    #[test]
    fn zero_chunks_is_a_configuration_error() {
        assert_eq!(chunk_size(10, 0), Err(ConfigError::ZeroChunks));
        assert!(Partition::new(10, 0).is_err());
        assert!(Partition::new(0, 3).is_err());
    }

    #[test]
    fn chunks_cover_every_row_exactly_once() {
        for height in 1..=40 {
            for num_chunks in 1..=45 {
                let part = Partition::new(height, num_chunks).unwrap();
                assert_eq!(part.chunk_size(), height.div_ceil(num_chunks));
                let mut next = 0;
                for (i, chunk) in part.chunks().enumerate() {
                    assert_eq!(chunk.index, i);
                    assert_eq!(chunk.start, next, "gap or overlap at h={height} n={num_chunks}");
                    assert!(!chunk.is_empty());
                    assert!(chunk.len() <= part.chunk_size());
                    next = chunk.end;
                }
                assert_eq!(next, height);
                assert!(part.len() <= num_chunks);
            }
        }
    }

    #[test]
    fn only_the_last_chunk_may_be_short() {
        let part = Partition::new(10, 3).unwrap();
        let lens: Vec<usize> = part.chunks().map(|c| c.len()).collect();
        assert_eq!(lens, vec![4, 4, 2]);
    }

    #[test]
    fn more_chunks_than_rows_yields_single_row_chunks() {
        let part = Partition::new(3, 8).unwrap();
        assert_eq!(part.len(), 3);
        assert!(part.chunks().all(|c| c.len() == 1));
        assert_eq!(part.chunk(3), None);
    }

    #[test]
    fn requested_count_can_collapse() {
        // ceil(10/4) = 3 rows per chunk gives 4 chunks, but ceil(10/6) = 2 gives 5.
        assert_eq!(Partition::new(10, 4).unwrap().len(), 4);
        assert_eq!(Partition::new(10, 6).unwrap().len(), 5);
    }

    #[test]
    fn chunk_of_maps_rows_back() {
        let part = Partition::new(10, 3).unwrap();
        assert_eq!(part.chunk_of(0).map(|c| c.index), Some(0));
        assert_eq!(part.chunk_of(4).map(|c| c.index), Some(1));
        assert_eq!(part.chunk_of(9).map(|c| c.index), Some(2));
        assert_eq!(part.chunk_of(10), None);
    }
}
