use crate::domain::model::{FailurePolicy, ScheduleQuery};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SCHEDULE_ENDPOINT: &str = "https://in.global.nba.com/stats2/scores/daily.json";
pub const DEFAULT_INJURIES_ENDPOINT: &str = "https://www.espn.com/nba/injuries";
pub const DEFAULT_SPLITS_ENDPOINT: &str = "https://nba.titan007.com/jsData/letGoal";

/// 所有欄位都有預設值，空檔案也是合法設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub sources: SourcesConfig,
    pub extract: ExtractConfig,
    pub error_handling: ErrorHandlingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub schedule_endpoint: String,
    pub injuries_endpoint: String,
    pub splits_endpoint: String,
    pub locale: String,
    pub time_zone: String,
    pub country_code: String,
    pub timeout_seconds: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            schedule_endpoint: DEFAULT_SCHEDULE_ENDPOINT.to_string(),
            injuries_endpoint: DEFAULT_INJURIES_ENDPOINT.to_string(),
            splits_endpoint: DEFAULT_SPLITS_ENDPOINT.to_string(),
            locale: "en".to_string(),
            time_zone: "+8".to_string(),
            country_code: "TW".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// 同時處理的比賽數 (每場比賽內的四個查詢另外並行)
    pub concurrent_requests: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            concurrent_requests: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHandlingConfig {
    /// "isolate" 或 "abort"
    pub on_source_failure: String,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            on_source_failure: "isolate".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCHEDULE_ENDPOINT})，找不到的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReportError::ConfigValidation {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("sources.schedule_endpoint", &self.sources.schedule_endpoint)?;
        validation::validate_url("sources.injuries_endpoint", &self.sources.injuries_endpoint)?;
        validation::validate_url("sources.splits_endpoint", &self.sources.splits_endpoint)?;

        validation::validate_non_empty_string("sources.locale", &self.sources.locale)?;
        validation::validate_non_empty_string("sources.time_zone", &self.sources.time_zone)?;
        validation::validate_non_empty_string("sources.country_code", &self.sources.country_code)?;

        validation::validate_positive_number(
            "sources.timeout_seconds",
            self.sources.timeout_seconds as usize,
            1,
        )?;
        validation::validate_positive_number(
            "extract.concurrent_requests",
            self.extract.concurrent_requests,
            1,
        )?;

        validation::validate_one_of(
            "error_handling.on_source_failure",
            &self.error_handling.on_source_failure.to_ascii_lowercase(),
            FailurePolicy::VALUES,
        )?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn schedule_endpoint(&self) -> &str {
        &self.sources.schedule_endpoint
    }

    fn injuries_endpoint(&self) -> &str {
        &self.sources.injuries_endpoint
    }

    fn splits_endpoint(&self) -> &str {
        &self.sources.splits_endpoint
    }

    fn schedule_query(&self) -> ScheduleQuery {
        ScheduleQuery {
            locale: self.sources.locale.clone(),
            time_zone: self.sources.time_zone.clone(),
            country_code: self.sources.country_code.clone(),
        }
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.sources.timeout_seconds)
    }

    fn concurrent_requests(&self) -> usize {
        self.extract.concurrent_requests.max(1)
    }

    fn failure_policy(&self) -> FailurePolicy {
        // 未通過驗證的值已在 validate_config 擋下
        self.error_handling
            .on_source_failure
            .parse()
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
