pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{ConsoleSink, FileSink, TeeSink};
pub use core::{
    etl::{ReportEngine, RunSummary},
    pipeline::DailyPipeline,
};
pub use domain::model::{FailurePolicy, RenderedReport, ReportScope};
pub use utils::error::{ReportError, Result};
