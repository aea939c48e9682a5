pub mod grid;
pub mod io;
pub mod pgm;
pub mod traits;

pub use self::grid::{load_grid, Grid, MAX_DIMENSION};
pub use self::traits::{ImageView, Rows};
