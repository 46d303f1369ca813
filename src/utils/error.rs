use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("{source_name} request to {url} returned status {status}")]
    Transport {
        source_name: &'static str,
        url: String,
        status: u16,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{source_name} decode error: {message}")]
    Decode {
        source_name: &'static str,
        message: String,
    },

    #[error("Invalid start time '{input}': {reason}")]
    InvalidTimeFilter { input: String, reason: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 快取中保存的失敗結果；底層錯誤無法複製時只保留分類與訊息
    #[error("{message}")]
    Replayed {
        category: ErrorCategory,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Decode,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ReportError {
    pub fn decode(source_name: &'static str, message: impl Into<String>) -> Self {
        ReportError::Decode {
            source_name,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ReportError::Transport { .. } | ReportError::Http(_) => ErrorCategory::Network,
            ReportError::Json(_) | ReportError::Decode { .. } => ErrorCategory::Decode,
            ReportError::InvalidTimeFilter { .. } => ErrorCategory::Input,
            ReportError::InvalidConfigValue { .. } | ReportError::ConfigValidation { .. } => {
                ErrorCategory::Configuration
            }
            ReportError::Io(_) => ErrorCategory::System,
            ReportError::Replayed { category, .. } => *category,
        }
    }

    /// 嚴重程度決定 CLI 的結束代碼
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Decode | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ReportError::Transport { status, .. } if *status == 404 => {
                "資料來源網址可能已變更，請檢查設定檔中的 endpoint"
            }
            ReportError::Transport { .. } | ReportError::Http(_) => "請檢查網路連線後再試一次",
            ReportError::Json(_) => "賽程資料格式可能已變更，請確認 schedule_endpoint 是否正確",
            ReportError::Decode { source_name, .. } if *source_name == "splits" => {
                "讓分資料的版面可能已改版，需要更新解析規則"
            }
            ReportError::Decode { .. } => "上游資料格式可能已變更",
            ReportError::InvalidTimeFilter { .. } => "請使用 24 小時制 HH:MM 格式，例如 '11:00'",
            ReportError::InvalidConfigValue { .. } | ReportError::ConfigValidation { .. } => {
                "請檢查設定檔內容"
            }
            ReportError::Io(_) => "請確認輸出目錄存在且可寫入",
            ReportError::Replayed { .. } => "同一次執行中該來源已失敗過，請稍後再試",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReportError::Transport { source_name, status, .. } => {
                format!("無法取得 {} 資料 (HTTP {})", source_name, status)
            }
            ReportError::Http(e) => format!("網路請求失敗: {}", e),
            ReportError::Json(e) => format!("賽程資料解析失敗: {}", e),
            ReportError::Decode {
                source_name,
                message,
            } => format!("{} 資料解析失敗: {}", source_name, message),
            ReportError::InvalidTimeFilter { input, reason } => {
                format!("開賽時間格式錯誤 '{}': {}", input, reason)
            }
            other => other.to_string(),
        }
    }
}

impl ReportError {
    /// 給快取重複交出同一個錯誤用。能完整複製的變體原樣複製，
    /// 其餘 (reqwest、serde_json、io) 轉成保留分類的 `Replayed`。
    pub fn replay(&self) -> Self {
        match self {
            ReportError::Transport {
                source_name,
                url,
                status,
            } => ReportError::Transport {
                source_name: *source_name,
                url: url.clone(),
                status: *status,
            },
            ReportError::Decode {
                source_name,
                message,
            } => ReportError::Decode {
                source_name: *source_name,
                message: message.clone(),
            },
            ReportError::InvalidTimeFilter { input, reason } => ReportError::InvalidTimeFilter {
                input: input.clone(),
                reason: reason.clone(),
            },
            ReportError::InvalidConfigValue {
                field,
                value,
                reason,
            } => ReportError::InvalidConfigValue {
                field: field.clone(),
                value: value.clone(),
                reason: reason.clone(),
            },
            ReportError::ConfigValidation { field, message } => ReportError::ConfigValidation {
                field: field.clone(),
                message: message.clone(),
            },
            other => ReportError::Replayed {
                category: other.category(),
                message: other.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_time_filter_is_low_severity() {
        let err = ReportError::InvalidTimeFilter {
            input: "7:00".to_string(),
            reason: "expected 5 characters".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("7:00"));
    }

    #[test]
    fn test_transport_error_is_network() {
        let err = ReportError::Transport {
            source_name: "injuries",
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_split_layout_suggestion() {
        let err = ReportError::decode("splits", "expected 3 semicolons, found 1");
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("讓分"));
    }

    #[test]
    fn test_replay_keeps_transport_details() {
        let err = ReportError::Transport {
            source_name: "splits",
            url: "https://odds.example.com/l1.js".to_string(),
            status: 503,
        };
        match err.replay() {
            ReportError::Transport {
                source_name,
                status,
                url,
            } => {
                assert_eq!(source_name, "splits");
                assert_eq!(status, 503);
                assert_eq!(url, "https://odds.example.com/l1.js");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_replay_of_uncloneable_error_keeps_category() {
        let err = ReportError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        let replayed = err.replay();

        assert!(matches!(replayed, ReportError::Replayed { .. }));
        assert_eq!(replayed.category(), ErrorCategory::System);
        assert_eq!(replayed.severity(), ErrorSeverity::Critical);
        assert!(replayed.to_string().contains("disk full"));
    }
}
