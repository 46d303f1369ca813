use crate::config::toml_config::TomlConfig;
use crate::domain::game_time::{self, TimeFilter};
use crate::domain::model::ReportScope;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "nba-daily")]
#[command(about = "今日 NBA 賽程、傷兵名單與讓分紀錄")]
pub struct CliConfig {
    /// 只列出這個開賽時間的比賽 (24 小時制 HH:MM)
    #[arg(long)]
    pub at: Option<String>,

    /// 指定賽程日期 (YYYY-MM-DD)，預設為 UTC-4 的今天
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// TOML 設定檔
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 另外把報告寫到這個目錄
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn report_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(game_time::schedule_date_today)
    }

    pub fn scope(&self) -> Result<ReportScope> {
        match &self.at {
            Some(at) => Ok(ReportScope::StartingAt(TimeFilter::parse(at)?)),
            None => Ok(ReportScope::AllGames),
        }
    }

    /// 有指定 `--config` 就讀檔，否則全部使用預設值
    pub fn load_settings(&self) -> Result<TomlConfig> {
        let settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.scope().map(|_| ())
    }
}
