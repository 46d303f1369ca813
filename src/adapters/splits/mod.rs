//! 讓分盤歷史紀錄來源。上游格式脆弱，解析細節都封在 [`blob`] 裡。

pub mod blob;

use crate::domain::model::SpreadSplit;
use crate::domain::ports::{Fetcher, SplitSource};
use crate::domain::teams::{self, NameContext};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const SOURCE_NAME: &str = "splits";

/// 七月以前屬於前一年開季的球季
const SEASON_ROLLOVER_MONTH: u32 = 7;

/// 球季標籤，例如 2023-05-15 → `22-23`，2023-10-01 → `23-24`
pub fn season_label(as_of: NaiveDate) -> String {
    let year = as_of.year();
    let (start, end) = if as_of.month() < SEASON_ROLLOVER_MONTH {
        (year - 1, year)
    } else {
        (year, year + 1)
    };
    format!("{:02}-{:02}", start.rem_euclid(100), end.rem_euclid(100))
}

/// 避開 CDN 快取用的版本戳記 (本地時間到小時)
pub fn version_stamp() -> String {
    Local::now().format("%Y%m%d%H").to_string()
}

pub fn request_url(endpoint: &str, season: &str, version: &str) -> String {
    format!(
        "{}/{}/l1.js?version={}",
        endpoint.trim_end_matches('/'),
        season,
        version
    )
}

/// 讓分資料用戶端。同一球季的腳本在一次執行中只抓一次，失敗結果也一併保存。
pub struct SplitClient<F: Fetcher> {
    fetcher: F,
    endpoint: String,
    blobs: Mutex<HashMap<String, Result<Arc<Vec<u8>>>>>,
}

impl<F: Fetcher> SplitClient<F> {
    pub fn new(fetcher: F, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            blobs: Mutex::new(HashMap::new()),
        }
    }

    async fn blob(&self, season: &str) -> Result<Arc<Vec<u8>>> {
        let mut blobs = self.blobs.lock().await;
        if let Some(cached) = blobs.get(season) {
            return cached.as_ref().map(Arc::clone).map_err(ReportError::replay);
        }

        let url = request_url(&self.endpoint, season, &version_stamp());
        tracing::info!("📈 Fetching spread splits for season {}", season);
        let fetched = self.fetcher.get(SOURCE_NAME, &url).await.map(Arc::new);
        let result = fetched.as_ref().map(Arc::clone).map_err(ReportError::replay);
        blobs.insert(season.to_string(), fetched);
        result
    }
}

#[async_trait]
impl<F: Fetcher + 'static> SplitSource for SplitClient<F> {
    async fn fetch_split(
        &self,
        team_display_name: &str,
        as_of: NaiveDate,
    ) -> Result<Option<SpreadSplit>> {
        let team = teams::resolve(team_display_name, NameContext::Split);
        let body = self.blob(&season_label(as_of)).await?;
        blob::extract_split(&body, &team)
    }
}
