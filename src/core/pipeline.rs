use crate::adapters::{HttpFetcher, InjuryClient, ScheduleClient, SplitClient};
use crate::core::report;
use crate::domain::model::{
    DailySlate, FailurePolicy, Game, Lookup, MatchReport, RenderedReport, ReportScope,
    SourceFailure,
};
use crate::domain::ports::{
    ConfigProvider, InjurySource, Pipeline, ReportSink, ScheduleSource, SplitSource,
};
use crate::utils::error::Result;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;

/// 每日報告管道：賽程 → 每場比賽四個查詢 → 組裝 → 輸出
pub struct DailyPipeline<K: ReportSink> {
    schedule: Arc<dyn ScheduleSource>,
    injuries: Arc<dyn InjurySource>,
    splits: Arc<dyn SplitSource>,
    sink: K,
    policy: FailurePolicy,
    concurrent_requests: usize,
    date: NaiveDate,
    scope: ReportScope,
}

impl<K: ReportSink> DailyPipeline<K> {
    /// 依設定建立三個 HTTP 來源，共用同一個連線池
    pub fn from_config<C: ConfigProvider>(
        config: &C,
        sink: K,
        date: NaiveDate,
        scope: ReportScope,
    ) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.request_timeout())?;

        let schedule = ScheduleClient::new(
            fetcher.clone(),
            config.schedule_endpoint(),
            config.schedule_query(),
        );
        let injuries = InjuryClient::new(fetcher.clone(), config.injuries_endpoint());
        let splits = SplitClient::new(fetcher, config.splits_endpoint());

        Ok(Self::with_sources(
            Arc::new(schedule),
            Arc::new(injuries),
            Arc::new(splits),
            sink,
            date,
            scope,
        )
        .with_policy(config.failure_policy())
        .with_concurrency(config.concurrent_requests()))
    }

    pub fn with_sources(
        schedule: Arc<dyn ScheduleSource>,
        injuries: Arc<dyn InjurySource>,
        splits: Arc<dyn SplitSource>,
        sink: K,
        date: NaiveDate,
        scope: ReportScope,
    ) -> Self {
        Self {
            schedule,
            injuries,
            splits,
            sink,
            policy: FailurePolicy::default(),
            concurrent_requests: 4,
            date,
            scope,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_concurrency(mut self, concurrent_requests: usize) -> Self {
        self.concurrent_requests = concurrent_requests.max(1);
        self
    }

    /// 查詢失敗時依策略決定中止或記錄在該場比賽上
    fn settle<T>(&self, source_name: &'static str, team: &str, result: Result<T>) -> Result<Lookup<T>> {
        match result {
            Ok(value) => Ok(Ok(value)),
            Err(e) => match self.policy {
                FailurePolicy::Abort => Err(e),
                FailurePolicy::Isolate => {
                    tracing::warn!("⚠️ {} lookup for {} failed: {}", source_name, team, e);
                    Ok(Err(SourceFailure {
                        source_name,
                        message: e.to_string(),
                    }))
                }
            },
        }
    }

    /// 一場比賽的四個查詢同時進行
    async fn lookup_match(&self, game: Game) -> Result<MatchReport> {
        let away = game.away.display_name.as_str();
        let home = game.home.display_name.as_str();

        let (away_injuries, home_injuries, away_split, home_split) = tokio::join!(
            self.injuries.fetch_injuries(away),
            self.injuries.fetch_injuries(home),
            self.splits.fetch_split(away, self.date),
            self.splits.fetch_split(home, self.date),
        );

        let away_injuries = self.settle("injuries", away, away_injuries)?;
        let home_injuries = self.settle("injuries", home, home_injuries)?;
        let away_split = self.settle("splits", away, away_split)?;
        let home_split = self.settle("splits", home, home_split)?;

        Ok(MatchReport {
            game,
            away_injuries,
            home_injuries,
            away_split,
            home_split,
        })
    }
}

#[async_trait::async_trait]
impl<K: ReportSink> Pipeline for DailyPipeline<K> {
    async fn extract(&self) -> Result<DailySlate> {
        let schedule = self.schedule.fetch_schedule(self.date).await?;
        let game_count = schedule.game_count;
        let games = report::select_games(schedule.games, &self.scope);
        tracing::info!("🔍 Looking up {} of {} games", games.len(), game_count);

        // buffered 依輸入順序產出，完成順序不影響報告順序
        let matches = stream::iter(games)
            .map(|game| self.lookup_match(game))
            .buffered(self.concurrent_requests)
            .try_collect::<Vec<_>>()
            .await?;

        let incomplete = matches.iter().filter(|m| !m.is_complete()).count();
        if incomplete > 0 {
            tracing::warn!("⚠️ {} games have missing source data", incomplete);
        }

        Ok(DailySlate {
            date: self.date,
            scope: self.scope,
            game_count,
            matches,
        })
    }

    async fn transform(&self, slate: DailySlate) -> Result<RenderedReport> {
        let report = report::build_report(&slate);
        tracing::debug!("Rendered {} games", report.games_included);
        Ok(report)
    }

    async fn load(&self, report: &RenderedReport) -> Result<String> {
        self.sink.deliver(report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game_time::{GameTime, TimeFilter};
    use crate::domain::model::{InjuryEntry, Schedule, SpreadSplit, TeamRef};
    use crate::utils::error::ReportError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedSchedule(Vec<Game>);

    #[async_trait]
    impl ScheduleSource for FixedSchedule {
        async fn fetch_schedule(&self, date: NaiveDate) -> Result<Schedule> {
            Ok(Schedule {
                date,
                game_count: self.0.len(),
                games: self.0.clone(),
            })
        }
    }

    /// 指定的球隊查詢失敗，其他球隊回傳一名傷兵；越前面的球隊延遲越久
    struct ScriptedInjuries {
        failing_team: Option<&'static str>,
    }

    #[async_trait]
    impl InjurySource for ScriptedInjuries {
        async fn fetch_injuries(&self, team: &str) -> Result<Vec<InjuryEntry>> {
            if team.starts_with("Los Angeles") {
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
            if Some(team) == self.failing_team {
                return Err(ReportError::Transport {
                    source_name: "injuries",
                    url: "https://injuries.test".to_string(),
                    status: 503,
                });
            }
            Ok(vec![InjuryEntry {
                player: format!("{} Player", team),
                status: "Out".to_string(),
                note: "out for the season".to_string(),
            }])
        }
    }

    struct FixedSplits;

    #[async_trait]
    impl SplitSource for FixedSplits {
        async fn fetch_split(&self, team: &str, _as_of: NaiveDate) -> Result<Option<SpreadSplit>> {
            if team == "Utah Jazz" {
                return Ok(None);
            }
            Ok(Some(SpreadSplit {
                team_name: team.to_string(),
                categories: [true, false, true, false, true],
            }))
        }
    }

    #[derive(Default)]
    struct MemorySink {
        delivered: Mutex<Vec<RenderedReport>>,
    }

    impl ReportSink for MemorySink {
        async fn deliver(&self, report: &RenderedReport) -> Result<String> {
            if let Ok(mut delivered) = self.delivered.lock() {
                delivered.push(report.clone());
            }
            Ok("memory".to_string())
        }
    }

    fn games() -> Vec<Game> {
        let make = |sequence, away: (&str, &str, &str), home: (&str, &str, &str), et: &str| Game {
            game_id: format!("g{}", sequence),
            sequence,
            away: TeamRef::from_feed(away.0, away.1, away.2),
            home: TeamRef::from_feed(home.0, home.1, home.2),
            start: GameTime::from_feed(et),
        };
        vec![
            make(0, ("LA", "Clippers", "LAC"), ("Boston", "Celtics", "BOS"), "2023-01-01T19:00"),
            make(1, ("Golden State", "Warriors", "GSW"), ("Utah", "Jazz", "UTA"), "2023-01-01T21:30"),
        ]
    }

    fn pipeline(failing_team: Option<&'static str>, scope: ReportScope) -> DailyPipeline<MemorySink> {
        DailyPipeline::with_sources(
            Arc::new(FixedSchedule(games())),
            Arc::new(ScriptedInjuries { failing_team }),
            Arc::new(FixedSplits),
            MemorySink::default(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            scope,
        )
    }

    #[tokio::test]
    async fn test_extract_keeps_feed_order_under_concurrency() {
        let slate = pipeline(None, ReportScope::AllGames)
            .with_concurrency(2)
            .extract()
            .await
            .unwrap();

        assert_eq!(slate.game_count, 2);
        let sequences: Vec<_> = slate.matches.iter().map(|m| m.game.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
        assert!(slate.matches.iter().all(|m| m.is_complete()));
        assert_eq!(slate.matches[1].home_split, Ok(None));
    }

    #[tokio::test]
    async fn test_extract_applies_time_filter() {
        let filter = TimeFilter::parse("10:30").unwrap();
        let slate = pipeline(None, ReportScope::StartingAt(filter))
            .extract()
            .await
            .unwrap();

        assert_eq!(slate.game_count, 2);
        assert_eq!(slate.matches.len(), 1);
        assert_eq!(slate.matches[0].game.home.display_name, "Utah Jazz");
    }

    #[tokio::test]
    async fn test_isolate_policy_keeps_other_games() {
        let pipeline = pipeline(Some("Boston Celtics"), ReportScope::AllGames)
            .with_policy(FailurePolicy::Isolate);
        let slate = pipeline.extract().await.unwrap();

        let failures = slate.matches[0].failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source_name, "injuries");
        assert!(slate.matches[1].is_complete());

        let report = pipeline.transform(slate).await.unwrap();
        assert!(report.detail.contains("資料擷取失敗 (injuries)"));
        assert!(report.detail.contains("Golden State Warriors Player"));
    }

    #[tokio::test]
    async fn test_abort_policy_fails_whole_run() {
        let result = pipeline(Some("Utah Jazz"), ReportScope::AllGames)
            .with_policy(FailurePolicy::Abort)
            .extract()
            .await;
        assert!(matches!(result, Err(ReportError::Transport { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_load_delivers_to_sink() {
        let pipeline = pipeline(None, ReportScope::AllGames);
        let slate = pipeline.extract().await.unwrap();
        let report = pipeline.transform(slate).await.unwrap();

        assert_eq!(pipeline.load(&report).await.unwrap(), "memory");
        let delivered = pipeline.sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].headline, "今日 2023-01-01 共 2 場比賽");
    }
}
