//! 聯盟傷兵頁面 (HTML)

use crate::domain::model::InjuryEntry;
use crate::domain::ports::{Fetcher, InjurySource};
use crate::domain::teams::{self, NameContext};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tokio::sync::OnceCell;

const SOURCE_NAME: &str = "injuries";

const SECTION_SELECTOR: &str = ".Table__league-injuries";
const TEAM_NAME_SELECTOR: &str = ".injuries__teamName";
const ROW_SELECTOR: &str = ".Table__even";
const PLAYER_SELECTOR: &str = ".AnchorLink";
const STATUS_SELECTOR: &str = ".col-stat";
const NOTE_SELECTOR: &str = ".col-desc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjurySection {
    pub team: String,
    pub entries: Vec<InjuryEntry>,
}

/// 整頁解析後的結果，一次解析供所有球隊查詢
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjuryReport {
    sections: Vec<InjurySection>,
}

struct Selectors {
    section: Selector,
    team_name: Selector,
    row: Selector,
    player: Selector,
    status: Selector,
    note: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            section: selector(SECTION_SELECTOR)?,
            team_name: selector(TEAM_NAME_SELECTOR)?,
            row: selector(ROW_SELECTOR)?,
            player: selector(PLAYER_SELECTOR)?,
            status: selector(STATUS_SELECTOR)?,
            note: selector(NOTE_SELECTOR)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ReportError::decode(SOURCE_NAME, format!("invalid selector {}: {:?}", css, e)))
}

/// 取出所有符合元素的文字並串接
fn select_text(element: &ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

impl InjuryReport {
    pub fn parse(html: &str) -> Result<Self> {
        let selectors = Selectors::new()?;
        let document = Html::parse_document(html);

        let sections = document
            .select(&selectors.section)
            .map(|section| {
                let team = select_text(&section, &selectors.team_name);
                let entries = section
                    .select(&selectors.row)
                    .filter_map(|row| {
                        let status = select_text(&row, &selectors.status);
                        // 有列出但狀態空白 = 沒有回報
                        if status.is_empty() {
                            return None;
                        }
                        Some(InjuryEntry {
                            player: select_text(&row, &selectors.player),
                            status,
                            note: select_text(&row, &selectors.note),
                        })
                    })
                    .collect();
                InjurySection { team, entries }
            })
            .collect::<Vec<_>>();

        tracing::debug!("🩹 Parsed {} team sections from injury page", sections.len());
        Ok(Self { sections })
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.team.as_str())
    }

    /// 不分大小寫、完全相符的隊名比對；依頁面順序
    pub fn for_team(&self, team: &str) -> Vec<InjuryEntry> {
        self.sections
            .iter()
            .filter(|s| s.team.to_lowercase() == team.to_lowercase())
            .flat_map(|s| s.entries.iter().cloned())
            .collect()
    }
}

/// 傷兵頁面用戶端。整頁在一次執行中只抓取、解析一次，失敗結果也一併保存。
pub struct InjuryClient<F: Fetcher> {
    fetcher: F,
    endpoint: String,
    page: OnceCell<Result<InjuryReport>>,
}

impl<F: Fetcher> InjuryClient<F> {
    pub fn new(fetcher: F, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            page: OnceCell::new(),
        }
    }

    async fn load_page(&self) -> Result<InjuryReport> {
        tracing::info!("🩹 Fetching injury report page");
        let body = self.fetcher.get(SOURCE_NAME, &self.endpoint).await?;
        InjuryReport::parse(&String::from_utf8_lossy(&body))
    }

    async fn page(&self) -> Result<&InjuryReport> {
        let page = self.page.get_or_init(|| self.load_page()).await;
        page.as_ref().map_err(ReportError::replay)
    }
}

#[async_trait]
impl<F: Fetcher + 'static> InjurySource for InjuryClient<F> {
    async fn fetch_injuries(&self, team_display_name: &str) -> Result<Vec<InjuryEntry>> {
        let search = teams::resolve(team_display_name, NameContext::Injury);
        let entries = self.page().await?.for_team(&search);
        tracing::debug!("{}: {} injury entries", search, entries.len());
        Ok(entries)
    }
}
