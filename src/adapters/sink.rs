use crate::domain::model::RenderedReport;
use crate::domain::ports::ReportSink;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_FILE: &str = "report.txt";
pub const DIGEST_FILE: &str = "digest.txt";
pub const JSON_FILE: &str = "report.json";

/// 直接印到標準輸出：先摘要，再標題與詳細內容
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ReportSink for ConsoleSink {
    async fn deliver(&self, report: &RenderedReport) -> Result<String> {
        if !report.digest.is_empty() {
            println!("{}", report.digest);
        }
        println!("{}", report.headline);
        if !report.detail.is_empty() {
            println!("{}", report.detail);
        }
        Ok("stdout".to_string())
    }
}

/// 把報告寫成檔案，目錄不存在時自動建立
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.dir.join(name);
        fs::write(&full_path, data)?;
        tracing::debug!("💾 Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }
}

impl ReportSink for FileSink {
    async fn deliver(&self, report: &RenderedReport) -> Result<String> {
        fs::create_dir_all(&self.dir)?;

        let mut full_report = report.headline.clone();
        if !report.detail.is_empty() {
            full_report.push('\n');
            full_report.push_str(&report.detail);
        }
        full_report.push('\n');

        self.write(REPORT_FILE, full_report.as_bytes())?;
        self.write(DIGEST_FILE, format!("{}\n", report.digest).as_bytes())?;
        self.write(JSON_FILE, serde_json::to_string_pretty(report)?.as_bytes())?;

        Ok(display_path(&self.dir))
    }
}

fn display_path(dir: &Path) -> String {
    dir.display().to_string()
}

/// 同時送到主要與 (選用的) 次要輸出，回傳最後一個輸出位置
#[derive(Debug, Clone)]
pub struct TeeSink<A, B> {
    primary: A,
    secondary: Option<B>,
}

impl<A: ReportSink, B: ReportSink> TeeSink<A, B> {
    pub fn new(primary: A, secondary: Option<B>) -> Self {
        Self { primary, secondary }
    }
}

impl<A: ReportSink, B: ReportSink> ReportSink for TeeSink<A, B> {
    async fn deliver(&self, report: &RenderedReport) -> Result<String> {
        let location = self.primary.deliver(report).await?;
        match &self.secondary {
            Some(sink) => sink.deliver(report).await,
            None => Ok(location),
        }
    }
}
