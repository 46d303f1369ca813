//! 球隊名稱對照表
//!
//! 三個資料來源對同一支球隊的稱呼不一致：賽程 JSON 給的是城市 + 隊名，
//! 傷兵頁面用 ESPN 的顯示名稱，讓分資料則用英文全名。這裡是唯一的對照表，
//! 程式啟動後只讀不寫。

/// 名稱要拿去哪個來源比對
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Schedule,
    Injury,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamInfo {
    pub code: &'static str,
    pub city: &'static str,
    pub nickname: &'static str,
    /// 顯示名稱，也是跨來源比對的主鍵
    pub display_name: &'static str,
    pub local_label: &'static str,
    /// 傷兵頁面上與顯示名稱不同的寫法
    pub injury_name: Option<&'static str>,
    /// 其他來源可能送來的別名
    pub aliases: &'static [&'static str],
}

const fn team(
    code: &'static str,
    city: &'static str,
    nickname: &'static str,
    display_name: &'static str,
    local_label: &'static str,
) -> TeamInfo {
    TeamInfo {
        code,
        city,
        nickname,
        display_name,
        local_label,
        injury_name: None,
        aliases: &[],
    }
}

pub static TEAMS: &[TeamInfo] = &[
    team("ATL", "Atlanta", "Hawks", "Atlanta Hawks", "老鷹"),
    team("BOS", "Boston", "Celtics", "Boston Celtics", "塞爾提克"),
    team("BKN", "Brooklyn", "Nets", "Brooklyn Nets", "籃網"),
    team("CLE", "Cleveland", "Cavaliers", "Cleveland Cavaliers", "騎士"),
    team("CHA", "Charlotte", "Hornets", "Charlotte Hornets", "黃蜂"),
    team("CHI", "Chicago", "Bulls", "Chicago Bulls", "公牛"),
    team("DAL", "Dallas", "Mavericks", "Dallas Mavericks", "獨行俠"),
    team("DEN", "Denver", "Nuggets", "Denver Nuggets", "金塊"),
    team("DET", "Detroit", "Pistons", "Detroit Pistons", "活塞"),
    team("GSW", "Golden State", "Warriors", "Golden State Warriors", "勇士"),
    team("HOU", "Houston", "Rockets", "Houston Rockets", "火箭"),
    team("IND", "Indiana", "Pacers", "Indiana Pacers", "溜馬"),
    team("LAL", "Los Angeles", "Lakers", "Los Angeles Lakers", "湖人"),
    // 賽程給 "LA"，ESPN 傷兵頁也寫 "LA Clippers"，但讓分資料用全名
    TeamInfo {
        code: "LAC",
        city: "Los Angeles",
        nickname: "Clippers",
        display_name: "Los Angeles Clippers",
        local_label: "快艇",
        injury_name: Some("LA Clippers"),
        aliases: &["LA Clippers"],
    },
    team("MEM", "Memphis", "Grizzlies", "Memphis Grizzlies", "灰熊"),
    team("MIA", "Miami", "Heat", "Miami Heat", "熱火"),
    team("MIL", "Milwaukee", "Bucks", "Milwaukee Bucks", "公鹿"),
    team("MIN", "Minnesota", "Timberwolves", "Minnesota Timberwolves", "灰狼"),
    team("NOP", "New Orleans", "Pelicans", "New Orleans Pelicans", "鵜鶘"),
    team("NYK", "New York", "Knicks", "New York Knicks", "尼克"),
    team("OKC", "Oklahoma City", "Thunder", "Oklahoma City Thunder", "雷霆"),
    team("ORL", "Orlando", "Magic", "Orlando Magic", "魔術"),
    team("PHI", "Philadelphia", "76ers", "Philadelphia 76ers", "76人"),
    team("PHX", "Phoenix", "Suns", "Phoenix Suns", "太陽"),
    team("POR", "Portland", "Trail Blazers", "Portland Trail Blazers", "拓荒者"),
    team("SAC", "Sacramento", "Kings", "Sacramento Kings", "國王"),
    team("SAS", "San Antonio", "Spurs", "San Antonio Spurs", "馬刺"),
    team("TOR", "Toronto", "Raptors", "Toronto Raptors", "暴龍"),
    team("UTA", "Utah", "Jazz", "Utah Jazz", "爵士"),
    team("WAS", "Washington", "Wizards", "Washington Wizards", "巫師"),
];

/// 以任何已知寫法查找球隊
pub fn lookup(name: &str) -> Option<&'static TeamInfo> {
    let name = name.trim();
    TEAMS.iter().find(|t| {
        t.display_name == name
            || t.injury_name == Some(name)
            || t.aliases.iter().any(|alias| *alias == name)
    })
}

pub fn lookup_code(code: &str) -> Option<&'static TeamInfo> {
    TEAMS.iter().find(|t| t.code.eq_ignore_ascii_case(code))
}

/// 轉成指定來源使用的名稱。查不到的名稱原樣傳回，下游查詢自然得到空結果。
pub fn resolve(raw_name: &str, context: NameContext) -> String {
    match lookup(raw_name) {
        Some(info) => match context {
            NameContext::Injury => info.injury_name.unwrap_or(info.display_name).to_string(),
            NameContext::Schedule | NameContext::Split => info.display_name.to_string(),
        },
        None => raw_name.to_string(),
    }
}

/// 摘要用的中文隊名，未知球隊退回原名
pub fn local_label(name: &str) -> &str {
    lookup(name).map(|info| info.local_label).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_every_franchise_once() {
        assert_eq!(TEAMS.len(), 30);
        for (i, a) in TEAMS.iter().enumerate() {
            for b in &TEAMS[i + 1..] {
                assert_ne!(a.code, b.code);
                assert_ne!(a.display_name, b.display_name);
            }
            assert_eq!(a.display_name, format!("{} {}", a.city, a.nickname));
        }
    }

    #[test]
    fn test_clippers_alias_per_context() {
        assert_eq!(
            resolve("LA Clippers", NameContext::Schedule),
            "Los Angeles Clippers"
        );
        assert_eq!(
            resolve("Los Angeles Clippers", NameContext::Injury),
            "LA Clippers"
        );
        assert_eq!(
            resolve("LA Clippers", NameContext::Split),
            "Los Angeles Clippers"
        );
        assert_eq!(resolve("Los Angeles Lakers", NameContext::Injury), "Los Angeles Lakers");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let contexts = [NameContext::Schedule, NameContext::Injury, NameContext::Split];
        for info in TEAMS {
            let mut names = vec![info.display_name];
            names.extend(info.injury_name);
            names.extend(info.aliases.iter().copied());
            for name in names {
                for ctx in contexts {
                    let once = resolve(name, ctx);
                    assert_eq!(resolve(&once, ctx), once, "{} in {:?}", name, ctx);
                }
            }
        }
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(resolve("Seattle SuperSonics", NameContext::Injury), "Seattle SuperSonics");
        assert_eq!(local_label("Seattle SuperSonics"), "Seattle SuperSonics");
    }

    #[test]
    fn test_local_label_accepts_any_spelling() {
        assert_eq!(local_label("LA Clippers"), "快艇");
        assert_eq!(local_label("Los Angeles Clippers"), "快艇");
        assert_eq!(local_label("Philadelphia 76ers"), "76人");
        assert_eq!(lookup_code("gsw").map(|t| t.local_label), Some("勇士"));
    }
}
