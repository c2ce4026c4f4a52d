use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::api::SearchApi;
use crate::lookup::{LookupResult, Resolver};
use crate::store::{settle, ArtifactSink};
use crate::telemetry;
use crate::telemetry::ops::batch::Phase as BatchPhase;

use super::progress::Progress;
use super::types::BatchReport;

/// Resolves a deduplicated query list one by one and persists the aggregate report.
pub struct Pipeline<'a> {
    resolver: Resolver<'a>,
    sink: &'a dyn ArtifactSink,
    source: String,
    cancel: Option<CancellationToken>,
}

impl<'a> Pipeline<'a> {
    pub fn new(api: &'a dyn SearchApi, sink: &'a dyn ArtifactSink, source: impl Into<String>) -> Self {
        Self { resolver: Resolver::new(api, sink), sink, source: source.into(), cancel: None }
    }

    /// Checked between items; a cancelled run still writes what it has.
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }

    pub async fn run(&self, queries: &[String], progress: &mut dyn Progress) -> BatchReport {
        let log = telemetry::batch();
        let total = queries.len();
        progress.begin(total);

        let mut report = BatchReport::new(self.source.clone());
        let mut cancelled = false;

        for (i, query) in queries.iter().enumerate() {
            if self.cancelled() {
                log.warn(format!("Cancelled after {} of {} item(s)", i, total));
                cancelled = true;
                break;
            }
            progress.item(i + 1, total, query);

            let span = log.span_kv(&BatchPhase::Resolve, [("index", (i + 1).to_string()), ("query", query.clone())]);
            let result = self.resolver.resolve(query).instrument(span).await;

            if result == LookupResult::NotFound {
                log.warn_kv(&format!("Failed to fetch data for: {}", query), [("query", query.clone())]);
            }
            progress.outcome(query, &result);
            report.add(query, result);
        }

        let report = report.seal(cancelled);
        let saved_to = {
            let _w = log.span(&BatchPhase::WriteReport).entered();
            settle("batch", self.sink.save_report(&report))
        };
        log.totals(report.statuses.len(), report.actions.len(), report.failures.len());
        progress.finish(&report, saved_to.as_deref());
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::api::ApiError;
    use crate::batch::list;
    use crate::batch::progress::{ConsoleProgress, NullProgress};
    use crate::store::memory::{RecordingSink, Saved};
    use serde_json::json;

    fn status_hit(name: &str) -> serde_json::Value {
        json!([{"en": name, "icon": "/i/010000/010405.png", "type": "Status", "id": 84, "description": {"en": "desc"}}])
    }

    #[tokio::test]
    async fn scenario_duplicate_and_comment_lines() {
        let queries = list::parse(["Bloodbath", "// comment", "", "Bloodbath"]);
        let api = MockApi::new();
        api.push(Ok(status_hit("Bloodbath")));
        let sink = RecordingSink::new();

        let report = Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut NullProgress).await;

        assert_eq!(report.metadata.count, 1);
        assert_eq!(report.statuses.len(), 1);
        assert_eq!(report.statuses[0].name, "Bloodbath");
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn buckets_are_filled_in_order_and_counted() {
        let queries = vec!["Bloodbath".to_string(), "Sprint".to_string(), "UnknownStatus".to_string()];
        let api = MockApi::new();
        api.push(Ok(status_hit("Bloodbath")));
        api.push(Ok(json!([])));
        api.push(Ok(json!([{"en": "Sprint", "icon": "/i/000000/000104.png", "id": 3}])));
        api.push(Ok(json!([])));
        api.push(Err(ApiError::Timeout));
        let sink = RecordingSink::new();

        let report = Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut NullProgress).await;

        assert_eq!(report.statuses.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["Bloodbath"]);
        assert_eq!(report.actions.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["Sprint"]);
        assert_eq!(report.failures, vec!["UnknownStatus"]);
        assert_eq!(report.metadata.count, report.statuses.len() + report.actions.len() + report.failures.len());
        assert_eq!(report.metadata.count, queries.len());
        assert_eq!(report.metadata.source, "list.txt");
        assert!(!report.metadata.cancelled);
    }

    #[tokio::test]
    async fn unresolvable_name_only_lands_in_failures() {
        let queries = vec!["DefinitelyNotARealStatus".to_string()];
        let api = MockApi::new();
        api.push(Ok(json!([])));
        api.push(Ok(json!([])));
        let sink = RecordingSink::new();

        let report = Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut NullProgress).await;

        assert!(report.statuses.is_empty());
        assert!(report.actions.is_empty());
        assert_eq!(report.failures, vec!["DefinitelyNotARealStatus"]);
    }

    #[tokio::test]
    async fn report_is_persisted_exactly_once() {
        let queries = vec!["a".to_string(), "b".to_string()];
        let api = MockApi::new();
        for _ in 0..4 {
            api.push(Ok(json!([])));
        }
        let sink = RecordingSink::new();

        let report = Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut NullProgress).await;

        let reports = sink.reports();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0], report);
        assert!(matches!(sink.saved().last(), Some(Saved::Report(_))));
    }

    #[tokio::test]
    async fn empty_list_still_writes_empty_report() {
        let api = MockApi::new();
        let sink = RecordingSink::new();

        let report = Pipeline::new(&api, &sink, "empty.txt").run(&[], &mut NullProgress).await;

        assert_eq!(report.metadata.count, 0);
        assert!(report.statuses.is_empty() && report.actions.is_empty() && report.failures.is_empty());
        assert_eq!(sink.reports().len(), 1);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn report_write_failure_does_not_abort() {
        let queries = vec!["Bloodbath".to_string()];
        let api = MockApi::new();
        api.push(Ok(status_hit("Bloodbath")));
        let sink = RecordingSink::failing();
        let mut progress = ConsoleProgress::new(Vec::new(), false);

        let report = Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut progress).await;

        assert_eq!(report.statuses.len(), 1);
        let text = String::from_utf8(progress.into_inner()).unwrap();
        assert!(text.contains("Results could not be saved"));
    }

    #[tokio::test]
    async fn cancelled_run_keeps_finished_items() {
        let queries = vec!["a".to_string(), "b".to_string()];
        let api = MockApi::new();
        let sink = RecordingSink::new();
        let token = CancellationToken::new();
        token.cancel();

        let report = Pipeline::new(&api, &sink, "list.txt")
            .with_cancel(token)
            .run(&queries, &mut NullProgress)
            .await;

        assert!(report.metadata.cancelled);
        assert_eq!(report.metadata.count, 0);
        assert_eq!(report.metadata.count, report.bucket_total());
        assert!(api.calls().is_empty());
        assert_eq!(sink.reports().len(), 1);
    }

    #[tokio::test]
    async fn console_progress_reports_position() {
        let queries = vec!["a".to_string(), "b".to_string()];
        let api = MockApi::new();
        for _ in 0..4 {
            api.push(Ok(json!([])));
        }
        let sink = RecordingSink::new();
        let mut progress = ConsoleProgress::new(Vec::new(), false);

        Pipeline::new(&api, &sink, "list.txt").run(&queries, &mut progress).await;

        let text = String::from_utf8(progress.into_inner()).unwrap();
        assert!(text.contains("Processing: a (1/2)"));
        assert!(text.contains("Processing: b (2/2)"));
        assert!(text.contains("Failed lookups: 2"));
    }
}
