use crate::domain::model::InjuryEntry;
use crate::domain::teams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjurySeverity {
    Out,
    MissedGame,
    WillNotPlay,
    Questionable,
    Doubtful,
    DayToDay,
    Probable,
    Unknown,
}

/// 依序比對，先命中者優先
const RULES: &[(&str, InjurySeverity)] = &[
    ("out", InjurySeverity::Out),
    ("miss", InjurySeverity::MissedGame),
    ("will not play", InjurySeverity::WillNotPlay),
    ("won't", InjurySeverity::WillNotPlay),
    ("question", InjurySeverity::Questionable),
    ("doubtful", InjurySeverity::Doubtful),
    ("day-to-day", InjurySeverity::DayToDay),
    ("probable", InjurySeverity::Probable),
];

pub const NO_INJURIES_TOKEN: &str = "無傷兵";
pub const TOKEN_SEPARATOR: &str = "/";

impl InjurySeverity {
    /// 依傷兵說明文字分類，不分大小寫的子字串比對
    pub fn classify(note: &str) -> Self {
        let note = note.to_lowercase();
        RULES
            .iter()
            .find(|(needle, _)| note.contains(needle))
            .map(|(_, severity)| *severity)
            .unwrap_or(InjurySeverity::Unknown)
    }

    pub fn label(&self) -> &'static str {
        match self {
            InjurySeverity::Out => "缺陣",
            InjurySeverity::MissedGame => "缺賽",
            InjurySeverity::WillNotPlay => "不出賽",
            InjurySeverity::Questionable => "出賽成疑",
            InjurySeverity::Doubtful => "可能缺陣",
            InjurySeverity::DayToDay => "每日評估",
            InjurySeverity::Probable => "可能出賽",
            InjurySeverity::Unknown => "狀況待確認",
        }
    }
}

/// 單一球員的摘要片段，例如 `Stephen Curry缺陣/`
pub fn render_player_fragment(entry: &InjuryEntry) -> String {
    let severity = InjurySeverity::classify(&entry.note);
    format!("{}{}{}", entry.player, severity.label(), TOKEN_SEPARATOR)
}

/// 一支球隊的摘要：`勇士--A缺陣/B出賽成疑/`，沒有傷兵時為 `勇士-無傷兵`
pub fn render_team_summary_token(team_display_name: &str, entries: &[InjuryEntry]) -> String {
    let label = teams::local_label(team_display_name);
    if entries.is_empty() {
        return format!("{}-{}", label, NO_INJURIES_TOKEN);
    }

    let mut token = format!("{}--", label);
    for entry in entries {
        token.push_str(&render_player_fragment(entry));
    }
    token
}
