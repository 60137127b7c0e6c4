// Journal JSON-line parsing and per-invocation aggregation

use serde_json::Value;
use std::collections::HashSet;

use crate::models::{RunRecord, RunStatus, json_u64, ms_to_iso, usec_to_ms};
use crate::validate;

/// Distinct well-formed INVOCATION_IDs in first-seen order, capped at
/// `limit`. Lines that are not JSON objects are skipped.
pub(super) fn invocation_ids(scan: &str, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    for line in scan.lines() {
        if ids.len() >= limit {
            break;
        }
        let Ok(entry) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        let Some(id) = entry.get("INVOCATION_ID").and_then(Value::as_str) else {
            continue;
        };
        if validate::invocation_id(id).is_err() || !seen.insert(id.to_string()) {
            continue;
        }
        ids.push(id.to_string());
    }
    ids
}

/// Fold all journal entries of one invocation into a run record:
/// earliest/latest __REALTIME_TIMESTAMP bound the run, CPU_USAGE_NSEC is
/// the maximum observed, status comes from the MESSAGE texts.
pub(super) fn run_record(invocation_id: String, raw: &str) -> RunRecord {
    let mut start_ms: Option<u64> = None;
    let mut end_ms: Option<u64> = None;
    let mut cpu_usage: Option<u64> = None;
    let mut status = RunStatus::Unknown;

    for line in raw.lines() {
        let Ok(entry) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        if let Some(ts) = usec_to_ms(entry.get("__REALTIME_TIMESTAMP")) {
            start_ms = Some(start_ms.map_or(ts, |s| s.min(ts)));
            end_ms = Some(end_ms.map_or(ts, |e| e.max(ts)));
        }
        if let Some(cpu) = entry.get("CPU_USAGE_NSEC").and_then(json_u64) {
            cpu_usage = Some(cpu_usage.map_or(cpu, |c| c.max(cpu)));
        }
        if let Some(message) = entry.get("MESSAGE").and_then(Value::as_str) {
            status = classify_message(status, message);
        }
    }

    let duration_ms = match (start_ms, end_ms) {
        (Some(start), Some(end)) => Some(end - start),
        _ => None,
    };
    RunRecord {
        invocation_id,
        start_iso: ms_to_iso(start_ms),
        start_ms,
        end_iso: ms_to_iso(end_ms),
        end_ms,
        duration_ms,
        status,
        cpu_usage_nsec: cpu_usage,
    }
}

/// Failure markers are sticky; completion markers upgrade to success only
/// from a non-failed state.
pub(super) fn classify_message(prev: RunStatus, message: &str) -> RunStatus {
    let m = message.to_lowercase();
    if m.contains("failed") || m.contains("error") || m.contains("exited") {
        return RunStatus::Failed;
    }
    if m.contains("deactivated successfully") || m.starts_with("finished ") {
        return if prev == RunStatus::Failed {
            prev
        } else {
            RunStatus::Success
        };
    }
    prev
}

#[cfg(test)]
mod tests {
    use super::*;

    const INV_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const INV_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

    fn scan_line(inv: &str) -> String {
        format!(r#"{{"INVOCATION_ID": "{inv}", "MESSAGE": "x"}}"#)
    }

    #[test]
    fn invocation_ids_dedupe_in_first_seen_order() {
        let scan = [
            scan_line(INV_A),
            "not json".to_string(),
            scan_line(INV_A),
            r#"{"MESSAGE": "no invocation"}"#.to_string(),
            scan_line(INV_B),
        ]
        .join("\n");
        assert_eq!(invocation_ids(&scan, 10), [INV_A, INV_B]);
    }

    #[test]
    fn invocation_ids_respect_limit() {
        let scan = [scan_line(INV_A), scan_line(INV_B)].join("\n");
        assert_eq!(invocation_ids(&scan, 1), [INV_A]);
    }

    #[test]
    fn invocation_ids_reject_malformed_ids() {
        let scan = [
            scan_line("UPPERCASE00000000000000000000000"),
            scan_line("short"),
            scan_line(INV_A),
        ]
        .join("\n");
        assert_eq!(invocation_ids(&scan, 10), [INV_A]);
    }

    #[test]
    fn run_record_aggregates_entries() {
        let raw = format!(
            "{}\n{}\n{}\n",
            r#"{"__REALTIME_TIMESTAMP": "1700000001000000", "MESSAGE": "Starting backup..."}"#,
            r#"{"__REALTIME_TIMESTAMP": "1700000002000000", "MESSAGE": "copying", "CPU_USAGE_NSEC": "120000"}"#,
            r#"{"__REALTIME_TIMESTAMP": "1700000005000000", "MESSAGE": "backup.service: Deactivated successfully.", "CPU_USAGE_NSEC": "340000"}"#,
        );
        let rec = run_record(INV_A.to_string(), &raw);
        assert_eq!(rec.invocation_id, INV_A);
        assert_eq!(rec.start_ms, Some(1_700_000_001_000));
        assert_eq!(rec.end_ms, Some(1_700_000_005_000));
        assert_eq!(rec.duration_ms, Some(4000));
        assert_eq!(rec.status, RunStatus::Success);
        assert_eq!(rec.cpu_usage_nsec, Some(340_000));
        assert!(rec.start_iso.as_deref().unwrap().ends_with("+00:00"));
    }

    #[test]
    fn run_record_with_no_entries_is_unknown() {
        let rec = run_record(INV_A.to_string(), "");
        assert_eq!(rec.status, RunStatus::Unknown);
        assert_eq!(rec.start_ms, None);
        assert_eq!(rec.duration_ms, None);
        assert_eq!(rec.cpu_usage_nsec, None);
    }

    #[test]
    fn classify_failure_is_sticky() {
        let s = classify_message(RunStatus::Unknown, "Main process exited, code=exited");
        assert_eq!(s, RunStatus::Failed);
        let s = classify_message(s, "backup.service: Deactivated successfully.");
        assert_eq!(s, RunStatus::Failed);
    }

    #[test]
    fn classify_success_markers() {
        assert_eq!(
            classify_message(RunStatus::Unknown, "Finished Daily backup."),
            RunStatus::Success
        );
        assert_eq!(
            classify_message(RunStatus::Unknown, "a.service: Deactivated successfully."),
            RunStatus::Success
        );
        assert_eq!(
            classify_message(RunStatus::Unknown, "ordinary log output"),
            RunStatus::Unknown
        );
    }
}
