//! 每日賽程 + boxscore JSON

use crate::domain::game_time::GameTime;
use crate::domain::model::{Game, Schedule, ScheduleQuery, TeamRef};
use crate::domain::ports::{Fetcher, ScheduleSource};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use url::Url;

const SOURCE_NAME: &str = "schedule";

// 以下結構對應上游 JSON。實際只讀 payload.date 底下的場次、球隊與開賽時間，
// 其他欄位 (boxscore、轉播、裁判) 照樣解碼但不使用。
// 非 Option 欄位遇到 null 一律當成預設值，和缺少欄位相同。

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleResponse {
    pub context: Option<serde_json::Value>,
    pub error: Option<FeedError>,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: Payload,
    pub timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedError {
    pub detail: Option<serde_json::Value>,
    pub is_error: Option<String>,
    pub message: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payload {
    pub league: Option<serde_json::Value>,
    pub season: Option<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub date: DatePayload,
    pub next_available_date_millis: Option<String>,
    pub utc_millis: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub games: Vec<FeedGame>,
    pub date_millis: Option<String>,
    #[serde(deserialize_with = "de_game_count")]
    pub game_count: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedGame {
    #[serde(deserialize_with = "null_as_default")]
    pub profile: GameProfile,
    #[serde(deserialize_with = "null_as_default")]
    pub boxscore: Boxscore,
    #[serde(deserialize_with = "null_as_default")]
    pub urls: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub broadcasters: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub home_team: FeedTeam,
    #[serde(deserialize_with = "null_as_default")]
    pub away_team: FeedTeam,
    #[serde(deserialize_with = "null_as_default")]
    pub if_necessary: bool,
    pub series_text: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameProfile {
    pub arena_location: Option<String>,
    pub arena_name: Option<String>,
    pub away_team_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_time_et: String,
    #[serde(deserialize_with = "null_as_default")]
    pub game_id: String,
    pub home_team_id: Option<String>,
    pub number: Option<String>,
    pub season_type: Option<String>,
    pub sequence: Option<String>,
    pub utc_millis: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Boxscore {
    pub attendance: Option<String>,
    pub away_score: Option<i64>,
    pub home_score: Option<i64>,
    pub period: Option<String>,
    pub period_clock: Option<serde_json::Value>,
    pub status: Option<String>,
    pub status_desc: Option<serde_json::Value>,
    pub officials_display_name1: Option<serde_json::Value>,
    pub officials_display_name2: Option<serde_json::Value>,
    pub officials_display_name3: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedTeam {
    #[serde(deserialize_with = "null_as_default")]
    pub profile: TeamProfile,
    pub matchup: Option<serde_json::Value>,
    pub score: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub abbr: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    pub city_en: Option<String>,
    pub code: Option<String>,
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    pub name_en: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `gameCount` 在上游是字串，也容忍數字、空字串與 null
fn de_game_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(|n| n as usize)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid gameCount {}", n))),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid gameCount '{}'", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid gameCount {}",
            other
        ))),
    }
}

/// 解碼賽程回應。`gameCount` 為 0 或缺少代表當天沒有比賽，不是錯誤。
pub fn decode_schedule(date: NaiveDate, body: &[u8]) -> Result<Schedule> {
    let response: ScheduleResponse = serde_json::from_slice(body)?;
    let date_payload = response.payload.date;

    if date_payload.game_count == 0 {
        tracing::info!("📅 No games scheduled on {}", date);
        return Ok(Schedule {
            date,
            game_count: 0,
            games: Vec::new(),
        });
    }

    let games = date_payload
        .games
        .into_iter()
        .enumerate()
        .map(|(sequence, g)| Game {
            game_id: g.profile.game_id,
            sequence,
            away: team_ref(&g.away_team.profile),
            home: team_ref(&g.home_team.profile),
            start: GameTime::from_feed(&g.profile.date_time_et),
        })
        .collect::<Vec<_>>();

    if games.len() != date_payload.game_count {
        tracing::warn!(
            "⚠️ gameCount says {} but feed lists {} games",
            date_payload.game_count,
            games.len()
        );
    }

    Ok(Schedule {
        date,
        game_count: date_payload.game_count,
        games,
    })
}

fn team_ref(profile: &TeamProfile) -> TeamRef {
    TeamRef::from_feed(&profile.city, &profile.name, &profile.abbr)
}

pub struct ScheduleClient<F: Fetcher> {
    fetcher: F,
    endpoint: String,
    query: ScheduleQuery,
}

impl<F: Fetcher> ScheduleClient<F> {
    pub fn new(fetcher: F, endpoint: impl Into<String>, query: ScheduleQuery) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
            query,
        }
    }

    pub fn request_url(&self, date: NaiveDate) -> Result<String> {
        let game_date = date.format("%Y-%m-%d").to_string();
        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("gameDate", game_date.as_str()),
                ("locale", self.query.locale.as_str()),
                ("tz", self.query.time_zone.as_str()),
                ("countryCode", self.query.country_code.as_str()),
            ],
        )
        .map_err(|e| ReportError::InvalidConfigValue {
            field: "sources.schedule_endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl<F: Fetcher + 'static> ScheduleSource for ScheduleClient<F> {
    async fn fetch_schedule(&self, date: NaiveDate) -> Result<Schedule> {
        let url = self.request_url(date)?;
        tracing::info!("🏀 Fetching schedule for {}", date);
        let body = self.fetcher.get(SOURCE_NAME, &url).await?;
        let schedule = decode_schedule(date, &body)?;
        tracing::info!("📋 Schedule lists {} games", schedule.games.len());
        Ok(schedule)
    }
}
