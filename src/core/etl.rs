use crate::domain::model::RenderedReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::{Duration, Instant};

/// 一次執行的結果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: RenderedReport,
    /// sink 回報的輸出位置
    pub location: String,
    pub elapsed: Duration,
}

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        tracing::info!("🚀 Starting daily report");

        // Extract
        let slate = self.pipeline.extract().await?;
        tracing::info!(
            "📦 Extracted {} games for {}",
            slate.matches.len(),
            slate.date
        );

        // Transform
        let report = self.pipeline.transform(slate).await?;

        // Load
        let location = self.pipeline.load(&report).await?;
        tracing::info!("📁 Report delivered to {}", location);

        let elapsed = started.elapsed();
        tracing::info!("⏱️ Spend Time: {:?}", elapsed);

        Ok(RunSummary {
            report,
            location,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DailySlate, ReportScope};
    use crate::utils::error::ReportError;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubPipeline {
        fail_extract: bool,
        loaded: AtomicBool,
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<DailySlate> {
            if self.fail_extract {
                return Err(ReportError::decode("schedule", "unexpected end of input"));
            }
            Ok(DailySlate {
                date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                scope: ReportScope::AllGames,
                game_count: 0,
                matches: Vec::new(),
            })
        }

        async fn transform(&self, slate: DailySlate) -> Result<RenderedReport> {
            Ok(crate::core::report::build_report(&slate))
        }

        async fn load(&self, _report: &RenderedReport) -> Result<String> {
            self.loaded.store(true, Ordering::SeqCst);
            Ok("stub".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_drives_all_phases() {
        let engine = ReportEngine::new(StubPipeline {
            fail_extract: false,
            loaded: AtomicBool::new(false),
        });
        let summary = engine.run().await.unwrap();

        assert_eq!(summary.location, "stub");
        assert_eq!(summary.report.headline, "今日 2023-01-01 沒有比賽");
        assert!(engine.pipeline.loaded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_extract_failure_skips_load() {
        let engine = ReportEngine::new(StubPipeline {
            fail_extract: true,
            loaded: AtomicBool::new(false),
        });

        assert!(matches!(engine.run().await, Err(ReportError::Decode { .. })));
        assert!(!engine.pipeline.loaded.load(Ordering::SeqCst));
    }
}
