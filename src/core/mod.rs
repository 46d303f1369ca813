pub mod etl;
pub mod pipeline;
pub mod report;

pub use crate::domain::ports::{ConfigProvider, Pipeline, ReportSink};
pub use crate::utils::error::Result;
