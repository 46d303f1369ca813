// Adapters layer: 外部系統的具體實作 (HTTP 傳輸、三個資料來源、報告輸出)

pub mod http;
pub mod injuries;
pub mod schedule;
pub mod sink;
pub mod splits;

pub use http::HttpFetcher;
pub use injuries::InjuryClient;
pub use schedule::ScheduleClient;
pub use sink::{ConsoleSink, FileSink, TeeSink};
pub use splits::SplitClient;
