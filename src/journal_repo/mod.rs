// Run history and per-invocation logs via journalctl

mod parse;

use futures_util::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use std::time::Duration;

use crate::error::Result;
use crate::exec::CommandRunner;
use crate::models::RunRecord;
use crate::validate;

const JOURNALCTL: &str = "journalctl";

const SCAN_TIMEOUT: Duration = Duration::from_secs(14);
const RUN_TIMEOUT: Duration = Duration::from_secs(10);
const LOGS_TIMEOUT: Duration = Duration::from_secs(12);

/// Per-invocation journal fetches in flight at once; order is preserved.
const RUN_FETCH_CONCURRENCY: usize = 4;

pub struct JournalRepo {
    runner: Arc<dyn CommandRunner>,
    scan_lines: u32,
}

impl JournalRepo {
    pub fn new(runner: Arc<dyn CommandRunner>, scan_lines: u32) -> Self {
        Self { runner, scan_lines }
    }

    /// One record per distinct INVOCATION_ID found in the last `scan_lines`
    /// journal entries for `log_unit`, in first-seen order, capped at `limit`.
    /// Completeness is bounded by journald retention and the scan window.
    pub async fn list_runs(&self, log_unit: &str, limit: u32) -> Result<Vec<RunRecord>> {
        validate::unit_name(log_unit)?;
        validate::limit(limit, validate::MAX_RUN_LIMIT)?;

        let unit_arg = format!("--unit={log_unit}");
        let scan_lines = self.scan_lines.to_string();
        let scan = self
            .runner
            .run(
                JOURNALCTL,
                &[&unit_arg, "-n", &scan_lines, "--no-pager", "-o", "json"],
                SCAN_TIMEOUT,
            )
            .await?;
        let ids = parse::invocation_ids(&scan, limit as usize);

        stream::iter(ids)
            .map(|id| self.fetch_run(log_unit, id))
            .buffered(RUN_FETCH_CONCURRENCY)
            .try_collect()
            .await
    }

    async fn fetch_run(&self, log_unit: &str, invocation_id: String) -> Result<RunRecord> {
        let unit_arg = format!("--unit={log_unit}");
        let match_arg = format!("INVOCATION_ID={invocation_id}");
        let raw = self
            .runner
            .run(
                JOURNALCTL,
                &[&unit_arg, &match_arg, "--no-pager", "-o", "json"],
                RUN_TIMEOUT,
            )
            .await?;
        Ok(parse::run_record(invocation_id, &raw))
    }

    /// Plain-text log lines for one invocation, newest `limit` lines.
    pub async fn logs_for_invocation(
        &self,
        log_unit: &str,
        invocation_id: &str,
        limit: u32,
    ) -> Result<String> {
        validate::unit_name(log_unit)?;
        validate::invocation_id(invocation_id)?;
        validate::limit(limit, validate::MAX_LOG_LIMIT)?;

        let unit_arg = format!("--unit={log_unit}");
        let match_arg = format!("INVOCATION_ID={invocation_id}");
        let lines = limit.to_string();
        let out = self
            .runner
            .run(
                JOURNALCTL,
                &[&unit_arg, &match_arg, "-n", &lines, "--no-pager", "-o", "cat"],
                LOGS_TIMEOUT,
            )
            .await?;
        Ok(out)
    }
}
