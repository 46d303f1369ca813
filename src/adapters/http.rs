use crate::domain::ports::Fetcher;
use crate::utils::error::{ReportError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// reqwest 實作的 [`Fetcher`]；Client 內部共用連線池，clone 成本很低
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nba-daily/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn get(&self, source_name: &'static str, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making {} request to: {}", source_name, url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", source_name, status);

        // 只接受 200，其他一律視為傳輸失敗
        if status != StatusCode::OK {
            return Err(ReportError::Transport {
                source_name,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!("📥 {}: received {} bytes", source_name, body.len());
        Ok(body.to_vec())
    }
}
