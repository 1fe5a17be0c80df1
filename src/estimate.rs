use crate::enumerator::CsvSource;
use std::process::Command;
use tracing::warn;

/// Supplies the best-effort total row count behind the size hints,
/// consulted once per `rows`/`batches` call.
pub trait RowCountEstimator {
    fn total_rows(&self, source: &CsvSource) -> Option<u64>;
}

/// Counts newline-terminated lines with an out-of-process `wc -l`, minus one
/// when a header row is present. Failures and path-less sources yield `None`.
pub struct WcLineCounter;

impl RowCountEstimator for WcLineCounter {
    fn total_rows(&self, source: &CsvSource) -> Option<u64> {
        let path = source.path()?;

        let output = match Command::new("wc").arg("-l").arg(path).output() {
            Ok(output) => output,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to run line count");
                return None;
            }
        };
        if !output.status.success() {
            warn!(path = %path.display(), status = %output.status, "Line count failed");
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let lines: u64 = stdout.split_whitespace().next()?.parse().ok()?;

        if source.has_headers() {
            Some(lines.saturating_sub(1))
        } else {
            Some(lines)
        }
    }
}

pub struct NoEstimate;

impl RowCountEstimator for NoEstimate {
    fn total_rows(&self, _source: &CsvSource) -> Option<u64> {
        None
    }
}
