use std::io::Write;
use std::path::Path;

use crate::lookup::LookupResult;
use crate::record::ResourceType;

use super::types::BatchReport;

/// Human-facing progress for a batch run. Never an error channel.
pub trait Progress {
    fn begin(&mut self, _total: usize) {}
    fn item(&mut self, _index: usize, _total: usize, _query: &str) {}
    fn outcome(&mut self, _query: &str, _result: &LookupResult) {}
    fn finish(&mut self, _report: &BatchReport, _saved_to: Option<&Path>) {}
}

/// A no-op progress sink.
#[cfg(test)]
pub struct NullProgress;
#[cfg(test)]
impl Progress for NullProgress {}

/// Plain line output; write errors are ignored.
pub struct ConsoleProgress<W: Write> {
    out: W,
    quiet: bool,
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W, quiet: bool) -> Self {
        Self { out, quiet }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn item(&mut self, index: usize, total: usize, query: &str) {
        let _ = writeln!(self.out, "Processing: {} ({}/{})", query, index, total);
    }

    fn outcome(&mut self, query: &str, result: &LookupResult) {
        if !self.quiet && result.kind() == Some(ResourceType::Action) {
            let _ = writeln!(self.out, "Found as action: {}", query);
        }
    }

    fn finish(&mut self, report: &BatchReport, saved_to: Option<&Path>) {
        match saved_to {
            Some(path) => { let _ = writeln!(self.out, "\nBatch processing complete. Results saved to {}", path.display()); }
            None => { let _ = writeln!(self.out, "\nBatch processing complete. Results could not be saved."); }
        }
        if report.metadata.cancelled {
            let _ = writeln!(self.out, "Run was cancelled after {} item(s).", report.metadata.count);
        }
        let _ = writeln!(self.out, "Successfully processed status effects: {}", report.statuses.len());
        let _ = writeln!(self.out, "Successfully processed actions: {}", report.actions.len());
        let _ = writeln!(self.out, "Failed lookups: {}", report.failures.len());

        if !report.failures.is_empty() {
            let _ = writeln!(self.out, "\nFailed lookups:");
            for failed in &report.failures {
                let _ = writeln!(self.out, "  - {}", failed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize;
    use serde_json::json;

    #[test]
    fn console_prints_progress_and_summary() {
        let mut p = ConsoleProgress::new(Vec::new(), false);
        let action = LookupResult::Found {
            kind: ResourceType::Action,
            record: normalize(&json!({"en": "Sprint"}), ResourceType::Action, "Sprint"),
        };

        p.item(1, 2, "Sprint");
        p.outcome("Sprint", &action);
        p.item(2, 2, "Nope");
        p.outcome("Nope", &LookupResult::NotFound);

        let mut report = BatchReport::new("list.txt");
        report.add("Sprint", action);
        report.add("Nope", LookupResult::NotFound);
        let report = report.seal(false);
        p.finish(&report, Some(Path::new("out/batch/results_1.json")));

        let text = String::from_utf8(p.into_inner()).unwrap();
        assert!(text.contains("Processing: Sprint (1/2)"));
        assert!(text.contains("Found as action: Sprint"));
        assert!(text.contains("Results saved to out/batch/results_1.json"));
        assert!(text.contains("Successfully processed actions: 1"));
        assert!(text.contains("Failed lookups: 1"));
        assert!(text.contains("  - Nope"));
    }

    #[test]
    fn quiet_hides_action_notice_but_not_progress() {
        let mut p = ConsoleProgress::new(Vec::new(), true);
        let action = LookupResult::Found {
            kind: ResourceType::Action,
            record: normalize(&json!({}), ResourceType::Action, "Sprint"),
        };
        p.item(1, 1, "Sprint");
        p.outcome("Sprint", &action);

        let text = String::from_utf8(p.into_inner()).unwrap();
        assert!(text.contains("Processing: Sprint (1/1)"));
        assert!(!text.contains("Found as action"));
    }
}
