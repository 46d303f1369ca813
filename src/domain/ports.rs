use crate::domain::model::{
    DailySlate, FailurePolicy, InjuryEntry, RenderedReport, Schedule, ScheduleQuery, SpreadSplit,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::time::Duration;

/// 最基本的 HTTP 能力：GET 一個網址，拿回內容或錯誤
pub trait Fetcher: Send + Sync {
    fn get(
        &self,
        source_name: &'static str,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_schedule(&self, date: NaiveDate) -> Result<Schedule>;
}

#[async_trait]
pub trait InjurySource: Send + Sync {
    async fn fetch_injuries(&self, team_display_name: &str) -> Result<Vec<InjuryEntry>>;
}

#[async_trait]
pub trait SplitSource: Send + Sync {
    /// 查不到該隊時回傳 `Ok(None)`，不算錯誤
    async fn fetch_split(
        &self,
        team_display_name: &str,
        as_of: NaiveDate,
    ) -> Result<Option<SpreadSplit>>;
}

pub trait ReportSink: Send + Sync {
    fn deliver(
        &self,
        report: &RenderedReport,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn schedule_endpoint(&self) -> &str;
    fn injuries_endpoint(&self) -> &str;
    fn splits_endpoint(&self) -> &str;
    fn schedule_query(&self) -> ScheduleQuery;
    fn request_timeout(&self) -> Duration;
    fn concurrent_requests(&self) -> usize;
    fn failure_policy(&self) -> FailurePolicy;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DailySlate>;
    async fn transform(&self, slate: DailySlate) -> Result<RenderedReport>;
    async fn load(&self, report: &RenderedReport) -> Result<String>;
}
