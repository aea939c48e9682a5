//! JSON run configuration for the `prewitt` tool.

pub mod run;

pub use run::{load_config, RunConfig, ScheduleConfig};
