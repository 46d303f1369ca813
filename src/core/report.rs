//! 報告組裝：純字串處理，不做任何 I/O

use crate::domain::injury;
use crate::domain::model::{
    DailySlate, Game, InjuryEntry, Lookup, MatchReport, RenderedReport, ReportScope, SpreadSplit,
};
use crate::domain::teams;

pub const SEPARATOR: &str = "  ---------------------------------";
pub const NO_INJURIES_PLACEHOLDER: &str = "目前無傷兵";
pub const NO_SPLIT_PLACEHOLDER: &str = "無資料";
pub const FETCH_FAILED_PLACEHOLDER: &str = "資料擷取失敗";

/// 依篩選條件挑出要報告的比賽，保持賽程順序
pub fn select_games(games: Vec<Game>, scope: &ReportScope) -> Vec<Game> {
    match scope {
        ReportScope::AllGames => games,
        ReportScope::StartingAt(filter) => games
            .into_iter()
            .filter(|g| filter.matches(&g.start))
            .collect(),
    }
}

pub fn headline(slate: &DailySlate) -> String {
    let count = slate.matches.len();
    match &slate.scope {
        ReportScope::AllGames if count == 0 => format!("今日 {} 沒有比賽", slate.date),
        ReportScope::AllGames => format!("今日 {} 共 {} 場比賽", slate.date, count),
        ReportScope::StartingAt(filter) if count == 0 => {
            format!("開賽時間 {} 沒有比賽", filter.label())
        }
        ReportScope::StartingAt(filter) => {
            format!("開賽時間 {} 共 {} 場比賽", filter.label(), count)
        }
    }
}

/// 單場比賽的詳細段落，index 從 1 起算
pub fn render_match(index: usize, report: &MatchReport) -> Vec<String> {
    let game = &report.game;
    let away = &game.away.display_name;
    let home = &game.home.display_name;

    let mut lines = vec![
        format!("{}. {}  {}  {}(主)", index, away, game.start.label(), home),
        String::new(),
    ];
    lines.extend(injury_block(away, &report.away_injuries));
    lines.extend(injury_block(home, &report.home_injuries));
    lines.push(split_line(away, &report.away_split));
    lines.push(split_line(home, &report.home_split));
    lines.push(String::new());
    lines
}

fn injury_block(team: &str, lookup: &Lookup<Vec<InjuryEntry>>) -> Vec<String> {
    let mut lines = vec![SEPARATOR.to_string(), format!("  {} injury 名單", team)];
    match lookup {
        Ok(entries) if entries.is_empty() => {
            lines.push(format!("  {}", NO_INJURIES_PLACEHOLDER));
        }
        Ok(entries) => {
            lines.extend(entries.iter().map(|e| format!("  {}", e.render_row())));
        }
        Err(failure) => {
            lines.push(format!("  {} ({})", FETCH_FAILED_PLACEHOLDER, failure.source_name));
        }
    }
    lines.push(String::new());
    lines
}

fn split_line(team: &str, lookup: &Lookup<Option<SpreadSplit>>) -> String {
    let marks = match lookup {
        Ok(Some(split)) => split.marks(),
        Ok(None) => NO_SPLIT_PLACEHOLDER.to_string(),
        Err(failure) => format!("{} ({})", FETCH_FAILED_PLACEHOLDER, failure.source_name),
    };
    format!("  {} 讓分勝負紀錄: {}", team, marks)
}

fn summary_token(team: &str, lookup: &Lookup<Vec<InjuryEntry>>) -> String {
    match lookup {
        Ok(entries) => injury::render_team_summary_token(team, entries),
        Err(_) => format!("{}-{}", teams::local_label(team), FETCH_FAILED_PLACEHOLDER),
    }
}

/// 每場比賽一行：`客隊摘要; 主隊摘要`
pub fn digest_line(report: &MatchReport) -> String {
    format!(
        "{}; {}",
        summary_token(&report.game.away.display_name, &report.away_injuries),
        summary_token(&report.game.home.display_name, &report.home_injuries)
    )
}

pub fn build_report(slate: &DailySlate) -> RenderedReport {
    let mut detail = Vec::new();
    let mut digest = Vec::new();

    for (i, report) in slate.matches.iter().enumerate() {
        detail.extend(render_match(i + 1, report));
        digest.push(digest_line(report));
    }

    // 結尾空行不保留
    while detail.last().is_some_and(|l| l.is_empty()) {
        detail.pop();
    }

    RenderedReport {
        date: slate.date,
        headline: headline(slate),
        detail: detail.join("\n"),
        digest: digest.join("\n"),
        games_included: slate.matches.len(),
    }
}
