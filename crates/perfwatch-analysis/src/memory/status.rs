//! Test-log scanner for memory status codes and generic memory issues.

use std::path::Path;
use std::sync::LazyLock;

use perfwatch_core::types::StatusObservation;
use regex::Regex;

static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)memory.*status[:\s]+(\d+)").unwrap());

static ISSUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)memory.*(?:leak|fail|error)").unwrap());

/// Observations for one line: a status record, an issue record, both, or neither.
pub fn parse_status_line(
    line_number: usize,
    line: &str,
) -> impl Iterator<Item = StatusObservation> {
    let status = STATUS_RE.captures(line).and_then(|caps| {
        let literal = caps.get(1)?.as_str();
        match literal.parse::<i64>() {
            Ok(code) => Some(StatusObservation::from_code(line_number, code, line)),
            Err(e) => {
                tracing::debug!(line_number, literal, error = %e, "dropping status record");
                None
            }
        }
    });
    let issue = ISSUE_RE
        .is_match(line)
        .then(|| StatusObservation::issue(line_number, line));
    status.into_iter().chain(issue)
}

/// Scan lines lazily; line numbers start at 1.
pub fn scan_status_lines<'a, I>(lines: I) -> impl Iterator<Item = StatusObservation> + 'a
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    lines
        .into_iter()
        .enumerate()
        .flat_map(|(idx, line)| parse_status_line(idx + 1, line))
}

/// Read and scan a test log. A missing or unreadable log yields nothing.
pub fn read_status_log(path: &Path) -> Vec<StatusObservation> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "log file not found");
        return Vec::new();
    }
    let text = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "log file unreadable");
            return Vec::new();
        }
    };
    let records: Vec<StatusObservation> = scan_status_lines(text.lines()).collect();
    tracing::info!(path = %path.display(), count = records.len(), "parsed memory status records");
    records
}
