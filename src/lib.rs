#![doc = include_str!("../README.md")]

pub mod config;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod image;
pub mod schedule;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{ConfigError, Error, IoError, RunError};
pub use crate::image::{load_grid, Grid};
pub use crate::schedule::{
    run_dynamic, run_static, AttributionLog, Policy, ScheduleOptions, ScheduleRun, Scheduler,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::{load_grid, Grid, ImageView};
    pub use crate::schedule::{
        run_dynamic, run_static, AttributionLog, Policy, ScheduleOptions, Scheduler,
    };
}
