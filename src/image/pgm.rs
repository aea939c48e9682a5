//! Plain (ASCII, `P2`) PGM reader and writer.
//!
//! Lines whose first non-blank character is `#` are comments and may appear
//! anywhere. The header is the magic `P2`, then `width height`, then the
//! maximum shade value; the body holds `width * height` whitespace-separated
//! samples in row-major order.
use super::grid::{load_grid, Grid};
use super::traits::ImageView;
use crate::error::IoError;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const MAGIC: &str = "P2";

/// Parse plain PGM text into a validated grid.
pub fn parse_pgm(text: &str) -> Result<Grid, IoError> {
    let mut tokens = text
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace);

    match tokens.next() {
        Some(MAGIC) => {}
        Some(other) => {
            return Err(IoError::InvalidPgm(format!(
                "expected magic {MAGIC}, found {other:?}"
            )))
        }
        None => return Err(IoError::InvalidPgm("empty input".to_string())),
    }

    let width: usize = header_field(tokens.next(), "width")?;
    let height: usize = header_field(tokens.next(), "height")?;
    let max_shades: u16 = header_field(tokens.next(), "maximum shade")?;

    let expected = width.saturating_mul(height);
    let mut samples = Vec::with_capacity(expected.min(1 << 24));
    for token in tokens.take(expected) {
        let value = token
            .parse::<u16>()
            .map_err(|_| IoError::InvalidPgm(format!("invalid sample {token:?}")))?;
        samples.push(value);
    }
    if samples.len() < expected {
        return Err(IoError::InvalidPgm(format!(
            "truncated body: expected {expected} samples, found {}",
            samples.len()
        )));
    }

    Ok(load_grid(width, height, max_shades, samples)?)
}

/// Render a grid as plain PGM text.
///
/// Every sample is followed by a single space and every row by a newline.
pub fn format_pgm(grid: &Grid) -> String {
    let mut out = String::with_capacity(16 + grid.width() * grid.height() * 4);
    // Writing into a String cannot fail.
    let _ = write!(
        out,
        "{MAGIC}\n{} {}\n{}\n",
        grid.width(),
        grid.height(),
        grid.max_shades()
    );
    for row in grid.rows() {
        for &px in row {
            let _ = write!(out, "{px} ");
        }
        out.push('\n');
    }
    out
}

/// Read a plain PGM file from disk.
pub fn read_pgm_file(path: &Path) -> Result<Grid, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pgm(&text)
}

/// Write a grid to disk as plain PGM.
pub fn write_pgm_file(grid: &Grid, path: &Path) -> Result<(), IoError> {
    fs::write(path, format_pgm(grid)).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn header_field<T: std::str::FromStr>(token: Option<&str>, name: &str) -> Result<T, IoError> {
    let token = token.ok_or_else(|| IoError::InvalidPgm(format!("missing {name}")))?;
    token
        .parse()
        .map_err(|_| IoError::InvalidPgm(format!("invalid {name} {token:?}")))
}
