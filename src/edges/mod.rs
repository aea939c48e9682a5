//! Edge-intensity kernels.
//!
//! Only the Prewitt operator is provided: a fixed 3×3 mask pair producing
//! an integer magnitude per interior pixel, zero on the border. The kernel
//! is pure and row-oriented so schedulers can hand out rows independently.

pub mod prewitt;

pub use prewitt::{compute_row, prewitt_at, MAX_EDGE_INTENSITY};
