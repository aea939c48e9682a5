//! Owned single-channel integer raster in row-major layout.
//!
//! A [`Grid`] is sized exactly to its content; there is no fixed capacity.
//! Samples are validated against `max_shades` on construction, so a grid
//! obtained from [`load_grid`] always satisfies `sample <= max_shades`.
use super::traits::ImageView;
use crate::error::ConfigError;

/// Largest supported width or height.
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Rectangular raster of integer intensities in `[0, max_shades]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    max_shades: u16,
    data: Vec<u16>,
}

impl Grid {
    /// Validate dimensions and samples, then take ownership of `data`.
    pub fn new(
        width: usize,
        height: usize,
        max_shades: u16,
        data: Vec<u16>,
    ) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        if max_shades == 0 {
            return Err(ConfigError::ZeroMaxShades);
        }
        let expected = width * height;
        if data.len() != expected {
            return Err(ConfigError::SampleCount {
                expected,
                actual: data.len(),
            });
        }
        if let Some(idx) = data.iter().position(|&v| v > max_shades) {
            return Err(ConfigError::SampleOutOfRange {
                row: idx / width,
                col: idx % width,
                value: data[idx],
                max_shades,
            });
        }
        Ok(Self {
            width,
            height,
            max_shades,
            data,
        })
    }

    /// Zero-filled grid with the given bounds. Dimensions must already be valid.
    pub(crate) fn zeroed(width: usize, height: usize, max_shades: u16) -> Self {
        Self {
            width,
            height,
            max_shades,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn max_shades(&self) -> u16 {
        self.max_shades
    }

    /// Sample at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.data[row * self.width + col]
    }

    /// Consume the grid and return its row-major samples.
    pub fn into_raw(self) -> Vec<u16> {
        self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [u16] {
        &mut self.data
    }
}

impl ImageView for Grid {
    type Pixel = u16;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u16] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u16]> {
        Some(&self.data)
    }
}

/// Build the immutable input grid from parsed raster fields.
pub fn load_grid(
    width: usize,
    height: usize,
    max_shades: u16,
    samples: Vec<u16>,
) -> Result<Grid, ConfigError> {
    Grid::new(width, height, max_shades, samples)
}

pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), ConfigError> {
    let ok = |side: usize| (1..=MAX_DIMENSION).contains(&side);
    if ok(width) && ok(height) {
        Ok(())
    } else {
        Err(ConfigError::Dimensions {
            width,
            height,
            max: MAX_DIMENSION,
        })
    }
}
