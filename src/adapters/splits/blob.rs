//! 讓分資料腳本的位置式解析
//!
//! 上游回傳的是一段 JavaScript，前三個分號切出兩個區段：
//!
//! ```text
//! ...;  <17 bytes 標頭>[[id,..,..,'Team Name',...],...] ;  <20 bytes 標頭>[[..,id,...,c12,c13,c14,c15,c16],...] ;
//!     ^ 分號 1                                           ^ 分號 2                                                ^ 分號 3
//! ```
//!
//! 球隊目錄在分號 1 之後 (略過 17 bytes 標頭)，到分號 2 的前一個 byte；
//! 戰績表在分號 2 之後 (略過 20 bytes 標頭)，到分號 3 的前一個 byte。
//! 兩個區段內都是 `[a,b,c]` 組成的清單，欄位以逗號分隔。格式沒有文件也沒有版本，
//! 所有位置常數都集中在這裡。

use crate::domain::model::SpreadSplit;
use crate::utils::error::{ReportError, Result};

const SOURCE_NAME: &str = "splits";

pub const SECTION_DELIMITER: u8 = b';';
/// 分號 1 之後到球隊目錄開頭的標頭長度 (含分號本身)
pub const DIRECTORY_HEADER_LEN: usize = 17;
/// 分號 2 之後到戰績表開頭的標頭長度 (含分號本身)
pub const RECORD_HEADER_LEN: usize = 20;

pub const DIRECTORY_ID_FIELD: usize = 0;
/// 英文隊名，前後帶引號
pub const DIRECTORY_NAME_FIELD: usize = 3;
pub const RECORD_ID_FIELD: usize = 1;
/// 五項紀錄依序在第 12 到 16 欄 (從 0 起算)
pub const RECORD_FIRST_CATEGORY_FIELD: usize = 12;
pub const CATEGORY_COUNT: usize = 5;

const NOT_COVERED: &str = "0";

/// 兩個區段的原始 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections<'a> {
    pub directory: &'a [u8],
    pub records: &'a [u8],
}

/// 依前三個分號切出球隊目錄與戰績表。分號不足三個時視為版面已變更。
pub fn split_sections(body: &[u8]) -> Result<Sections<'_>> {
    let delimiters = body
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == SECTION_DELIMITER)
        .map(|(i, _)| i)
        .take(3)
        .collect::<Vec<_>>();

    if delimiters.len() < 3 {
        return Err(ReportError::decode(
            SOURCE_NAME,
            format!(
                "expected at least 3 '{}' delimiters, found {}",
                SECTION_DELIMITER as char,
                delimiters.len()
            ),
        ));
    }

    let directory = section(body, delimiters[0] + DIRECTORY_HEADER_LEN, delimiters[1])?;
    let records = section(body, delimiters[1] + RECORD_HEADER_LEN, delimiters[2])?;
    Ok(Sections { directory, records })
}

/// `start..delimiter-1`；標頭比區段還長時視為空區段
fn section(body: &[u8], start: usize, delimiter: usize) -> Result<&[u8]> {
    let end = delimiter.saturating_sub(1);
    if start >= end {
        return Ok(&[]);
    }
    body.get(start..end)
        .ok_or_else(|| ReportError::decode(SOURCE_NAME, "section bounds out of range"))
}

/// 逐一取出 `[...]` 的內容 (不含括號)。遇到巢狀的外層 `[` 時以最內層為準。
pub fn bracket_entries(section: &[u8]) -> Vec<&[u8]> {
    let mut entries = Vec::new();
    let mut open: Option<usize> = None;

    for (i, b) in section.iter().enumerate() {
        match b {
            b'[' => open = Some(i + 1),
            b']' => {
                if let Some(start) = open.take() {
                    entries.push(&section[start..i]);
                }
            }
            _ => {}
        }
    }

    entries
}

pub fn fields(entry: &[u8]) -> Vec<&[u8]> {
    entry.split(|b| *b == b',').collect()
}

fn field_text(field: &[u8]) -> String {
    String::from_utf8_lossy(field).trim().to_string()
}

fn parse_id(field: Option<&&[u8]>) -> Option<u32> {
    field.and_then(|f| field_text(f).parse().ok())
}

fn unquote(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .or_else(|| text.strip_prefix('"').and_then(|t| t.strip_suffix('"')))
        .unwrap_or(text)
}

/// `"0"` = 未過盤，其他任何值 = 過盤
pub fn covered(raw: &str) -> bool {
    raw.trim() != NOT_COVERED
}

/// 球隊目錄中名稱符合的球隊編號 (只保留要查的那一隊)
pub fn directory_ids(directory: &[u8], team_name: &str) -> Vec<u32> {
    bracket_entries(directory)
        .into_iter()
        .filter_map(|entry| {
            let fields = fields(entry);
            let name = fields.get(DIRECTORY_NAME_FIELD).map(|f| field_text(f))?;
            if unquote(&name) != team_name {
                return None;
            }
            let id = parse_id(fields.get(DIRECTORY_ID_FIELD));
            if id.is_none() {
                tracing::warn!("⚠️ Directory entry for {} has no numeric id", team_name);
            }
            id
        })
        .collect()
}

/// 戰績表中某一列的五項紀錄；欄位不足時傳回 None。
/// 每項比對整個欄位，所以 `05` 或 `00` 都不等於 `0`。
pub fn record_categories(fields: &[&[u8]]) -> Option<[bool; CATEGORY_COUNT]> {
    let raw = fields.get(RECORD_FIRST_CATEGORY_FIELD..RECORD_FIRST_CATEGORY_FIELD + CATEGORY_COUNT)?;
    let mut categories = [false; CATEGORY_COUNT];
    for (slot, value) in categories.iter_mut().zip(raw) {
        *slot = covered(&field_text(value));
    }
    Some(categories)
}

/// 從整段腳本取出一隊的讓分紀錄。該隊沒同時出現在兩個區段時傳回 `Ok(None)`。
pub fn extract_split(body: &[u8], team_name: &str) -> Result<Option<SpreadSplit>> {
    let sections = split_sections(body)?;

    let ids = directory_ids(sections.directory, team_name);
    if ids.is_empty() {
        tracing::debug!("{} not found in split directory", team_name);
        return Ok(None);
    }

    let mut found = None;
    for entry in bracket_entries(sections.records) {
        let fields = fields(entry);
        let Some(id) = parse_id(fields.get(RECORD_ID_FIELD)) else {
            continue;
        };
        if !ids.contains(&id) {
            continue;
        }
        match record_categories(&fields) {
            // 同一隊重複出現時以最後一筆為準
            Some(categories) => found = Some(categories),
            None => tracing::warn!(
                "⚠️ Split record for team id {} has only {} fields",
                id,
                fields.len()
            ),
        }
    }

    Ok(found.map(|categories| SpreadSplit {
        team_name: team_name.to_string(),
        categories,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 組出符合標頭長度的腳本：`;` + 16 bytes 再接目錄，`;` + 19 bytes 再接戰績表
    fn blob(directory: &str, records: &str) -> String {
        format!(
            "var SclassID = 1;\r\nvar arrTeam = {}];\r\nvar TotalPanLu = {}];\r\n",
            directory, records
        )
    }

    fn record(id: u32, categories: [&str; 5]) -> String {
        let mut fields = vec![format!("{}", id * 10), id.to_string()];
        for i in 2..RECORD_FIRST_CATEGORY_FIELD {
            fields.push((i * 3).to_string());
        }
        fields.extend(categories.iter().map(|c| c.to_string()));
        format!("[{}]", fields.join(","))
    }

    fn two_team_blob() -> String {
        let directory = "[[1,'波士頓塞爾提克','塞爾提克','Boston Celtics',''],[7,'洛杉磯快艇','快艇','Los Angeles Clippers','']";
        let records = format!("[{},{}", record(1, ["1", "0", "2", "0", "1"]), record(7, ["0", "0", "0", "1", "0"]));
        blob(directory, &records)
    }

    #[test]
    fn test_header_lengths_match_fixture_layout() {
        assert_eq!(";\r\nvar arrTeam = ".len(), DIRECTORY_HEADER_LEN);
        assert_eq!(";\r\nvar TotalPanLu = ".len(), RECORD_HEADER_LEN);
    }

    #[test]
    fn test_split_sections() {
        let body = two_team_blob();
        let sections = split_sections(body.as_bytes()).unwrap();
        assert!(sections.directory.starts_with(b"[[1,"));
        assert!(sections.directory.ends_with(b"'']"));
        assert!(sections.records.starts_with(b"[[10,1,"));
    }

    #[test]
    fn test_fewer_than_three_semicolons_is_fatal() {
        let result = extract_split(b"var a = 1; var b = 2", "Boston Celtics");
        assert!(matches!(
            result,
            Err(ReportError::Decode { source_name: "splits", .. })
        ));
    }

    #[test]
    fn test_bracket_entries_use_innermost_brackets() {
        let entries = bracket_entries(b"[[1,a],[2,b]]");
        assert_eq!(entries, vec![&b"1,a"[..], &b"2,b"[..]]);
    }

    #[test]
    fn test_extract_each_team_from_two_team_blob() {
        let body = two_team_blob();

        let celtics = extract_split(body.as_bytes(), "Boston Celtics").unwrap().unwrap();
        assert_eq!(celtics.categories, [true, false, true, false, true]);

        let clippers = extract_split(body.as_bytes(), "Los Angeles Clippers")
            .unwrap()
            .unwrap();
        assert_eq!(clippers.categories, [false, false, false, true, false]);
        assert_eq!(clippers.team_name, "Los Angeles Clippers");
    }

    #[test]
    fn test_team_in_directory_without_record_is_absent() {
        let directory = "[[1,'x','x','Boston Celtics',''],[9,'y','y','Utah Jazz','']";
        let records = format!("[{}", record(1, ["1", "1", "1", "1", "1"]));
        let body = blob(directory, &records);

        assert!(extract_split(body.as_bytes(), "Utah Jazz").unwrap().is_none());
    }

    #[test]
    fn test_unknown_team_is_absent() {
        let body = two_team_blob();
        assert!(extract_split(body.as_bytes(), "Miami Heat").unwrap().is_none());
    }

    #[test]
    fn test_short_record_is_skipped() {
        let directory = "[[1,'x','x','Boston Celtics','']";
        let records = "[[10,1,2,3]";
        let body = blob(directory, records);
        assert!(extract_split(body.as_bytes(), "Boston Celtics").unwrap().is_none());
    }

    #[test]
    fn test_covered_transform() {
        assert!(!covered("0"));
        assert!(!covered(" 0 "));
        assert!(covered("1"));
        assert!(covered("2"));
        assert!(covered(""));
    }

    #[test]
    fn test_multi_digit_category_reads_whole_field() {
        let line = record(3, ["05", "00", "0", "10", " 0"]);
        let inner = &line[1..line.len() - 1];
        let fields: Vec<&[u8]> = inner.split(',').map(str::as_bytes).collect();

        assert_eq!(
            record_categories(&fields),
            Some([true, true, false, true, false])
        );
    }
}
