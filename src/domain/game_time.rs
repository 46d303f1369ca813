use crate::utils::error::{ReportError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// 賽程中 `dateTimeEt` 的格式，沒有時區
pub const FEED_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M";

/// 美東時間 → UTC → 顯示時區 (UTC+8) 兩次換算合併成固定 +13 小時
pub const DISPLAY_SHIFT_HOURS: i64 = 13;

pub const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// 賽程日期以 UTC-4 的「今天」為準
pub const SCHEDULE_UTC_OFFSET_HOURS: i64 = -4;

const UNKNOWN_TIME_LABEL: &str = "--:--";

pub fn schedule_date_today() -> NaiveDate {
    (Utc::now().naive_utc() + Duration::hours(SCHEDULE_UTC_OFFSET_HOURS)).date()
}

/// 開賽時間：保留原始字串，另存換算後的顯示時間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTime {
    pub raw: String,
    pub display: Option<NaiveTime>,
}

impl GameTime {
    pub fn from_feed(raw: &str) -> Self {
        let display = NaiveDateTime::parse_from_str(raw.trim(), FEED_TIME_LAYOUT)
            .ok()
            .map(|t| (t + Duration::hours(DISPLAY_SHIFT_HOURS)).time());

        if display.is_none() {
            tracing::warn!("⚠️ Unparseable game time in schedule feed: '{}'", raw);
        }

        Self {
            raw: raw.to_string(),
            display,
        }
    }

    pub fn label(&self) -> String {
        self.display
            .map(|t| t.format(DISPLAY_TIME_FORMAT).to_string())
            .unwrap_or_else(|| UNKNOWN_TIME_LABEL.to_string())
    }
}

/// 24 小時制 `HH:MM` 的開賽時間篩選條件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFilter(NaiveTime);

impl TimeFilter {
    pub fn parse(input: &str) -> Result<Self> {
        if input.len() != 5 {
            return Err(ReportError::InvalidTimeFilter {
                input: input.to_string(),
                reason: "必須剛好 5 個字元，例如 '11:00'".to_string(),
            });
        }

        NaiveTime::parse_from_str(input, DISPLAY_TIME_FORMAT)
            .map(TimeFilter)
            .map_err(|e| ReportError::InvalidTimeFilter {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }

    pub fn matches(&self, time: &GameTime) -> bool {
        time.display == Some(self.0)
    }

    pub fn label(&self) -> String {
        self.0.format(DISPLAY_TIME_FORMAT).to_string()
    }
}
