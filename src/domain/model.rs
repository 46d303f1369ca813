use crate::domain::game_time::{GameTime, TimeFilter};
use crate::domain::teams::{self, NameContext};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub city: String,
    pub short_name: String,
    pub display_name: String,
}

impl TeamRef {
    /// 由賽程資料的城市、隊名 (與縮寫) 建立，已知球隊一律套用對照表的寫法
    pub fn from_feed(city: &str, short_name: &str, code: &str) -> Self {
        let raw = format!("{} {}", city.trim(), short_name.trim());
        let known = teams::lookup(&raw).or_else(|| teams::lookup_code(code.trim()));

        match known {
            Some(info) => Self {
                city: info.city.to_string(),
                short_name: info.nickname.to_string(),
                display_name: info.display_name.to_string(),
            },
            None => Self {
                city: city.trim().to_string(),
                short_name: short_name.trim().to_string(),
                display_name: teams::resolve(&raw, NameContext::Schedule),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub game_id: String,
    /// 在賽程中的順序，從 0 起算
    pub sequence: usize,
    pub away: TeamRef,
    pub home: TeamRef,
    pub start: GameTime,
}

#[derive(Debug, Clone)]
pub struct Schedule {
    pub date: NaiveDate,
    pub game_count: usize,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryEntry {
    pub player: String,
    pub status: String,
    pub note: String,
}

impl InjuryEntry {
    /// 詳細報告中的一列：球員 25、狀態 15、說明 5 字元寬
    pub fn render_row(&self) -> String {
        format!("{:<25}{:<15}{:<5}", self.player, self.status, self.note)
    }
}

/// 讓分盤五項紀錄。來源沒有標示各欄意義，只保留原本的順序。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadSplit {
    pub team_name: String,
    /// true = 過盤
    pub categories: [bool; 5],
}

impl SpreadSplit {
    pub fn marks(&self) -> String {
        self.categories
            .iter()
            .map(|covered| if *covered { "贏" } else { "輸" })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// 單一來源查詢失敗 (只在 isolate 模式下出現)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source_name: &'static str,
    pub message: String,
}

pub type Lookup<T> = std::result::Result<T, SourceFailure>;

#[derive(Debug, Clone)]
pub struct MatchReport {
    pub game: Game,
    pub away_injuries: Lookup<Vec<InjuryEntry>>,
    pub home_injuries: Lookup<Vec<InjuryEntry>>,
    pub away_split: Lookup<Option<SpreadSplit>>,
    pub home_split: Lookup<Option<SpreadSplit>>,
}

impl MatchReport {
    pub fn failures(&self) -> Vec<&SourceFailure> {
        [
            self.away_injuries.as_ref().err(),
            self.home_injuries.as_ref().err(),
            self.away_split.as_ref().err(),
            self.home_split.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportScope {
    AllGames,
    StartingAt(TimeFilter),
}

#[derive(Debug, Clone)]
pub struct DailySlate {
    pub date: NaiveDate,
    pub scope: ReportScope,
    /// 賽程回報的當日場次數，未篩選前
    pub game_count: usize,
    pub matches: Vec<MatchReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReport {
    pub date: NaiveDate,
    pub headline: String,
    pub detail: String,
    pub digest: String,
    pub games_included: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub locale: String,
    pub time_zone: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// 任一來源失敗就整個中止，不輸出任何報告
    Abort,
    /// 失敗的欄位顯示佔位字串，其餘比賽照常輸出
    #[default]
    Isolate,
}

impl FailurePolicy {
    pub const VALUES: &'static [&'static str] = &["abort", "isolate"];
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "isolate" => Ok(FailurePolicy::Isolate),
            other => Err(format!("unknown failure policy '{}'", other)),
        }
    }
}
