use clap::Parser;
use nba_daily::utils::error::{ErrorSeverity, ReportError};
use nba_daily::utils::{logger, validation::Validate};
use nba_daily::{CliConfig, ConsoleSink, DailyPipeline, FileSink, ReportEngine, TeeSink};

fn exit_code(e: &ReportError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 輸入錯誤，已告知使用者
        ErrorSeverity::Medium => 2,   // 網路問題，可重試
        ErrorSeverity::High => 1,     // 上游資料或設定錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn report_failure(stage: &str, e: &ReportError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    // 時間格式錯誤時不發出任何請求
    if let Err(e) = config.validate() {
        report_failure("Input validation", &e);
    }

    let settings = match config.load_settings() {
        Ok(settings) => settings,
        Err(e) => report_failure("Configuration", &e),
    };
    let scope = match config.scope() {
        Ok(scope) => scope,
        Err(e) => report_failure("Input validation", &e),
    };
    let date = config.report_date();

    let sink = TeeSink::new(ConsoleSink, config.output.clone().map(FileSink::new));
    let pipeline = match DailyPipeline::from_config(&settings, sink, date, scope) {
        Ok(pipeline) => pipeline,
        Err(e) => report_failure("Setup", &e),
    };

    match ReportEngine::new(pipeline).run().await {
        Ok(summary) => {
            println!("Spend Time: {:?}", summary.elapsed);
            if config.output.is_some() {
                println!("📁 Output saved to: {}", summary.location);
            }
        }
        Err(e) => report_failure("Daily report", &e),
    }

    Ok(())
}
