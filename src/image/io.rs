//! File-level helpers for grids and JSON.
//!
//! - `load_grid_file`: `.pgm` goes through the plain PGM reader, anything
//!   else through the `image` crate as 8-bit luma.
//! - `save_grid_file`: mirror of the above for output grids.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::grid::{load_grid, Grid};
use super::pgm::{read_pgm_file, write_pgm_file};
use super::traits::ImageView;
use crate::error::IoError;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

fn is_pgm(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"))
}

/// Load a raster from disk as an input grid.
pub fn load_grid_file(path: &Path) -> Result<Grid, IoError> {
    if is_pgm(path) {
        return read_pgm_file(path);
    }
    let img = image::open(path)
        .map_err(|source| IoError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let samples = img.into_raw().into_iter().map(u16::from).collect();
    Ok(load_grid(width, height, u8::MAX.into(), samples)?)
}

/// Save a grid to disk, creating parent directories.
///
/// Non-PGM targets are written as 8-bit grayscale; samples above 255 saturate.
pub fn save_grid_file(grid: &Grid, path: &Path) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    if is_pgm(path) {
        return write_pgm_file(grid, path);
    }
    let mut out = GrayImage::new(grid.width() as u32, grid.height() as u32);
    for (y, row) in grid.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = px.min(u16::from(u8::MAX)) as u8;
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path).map_err(|source| IoError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), IoError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| IoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| IoError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
