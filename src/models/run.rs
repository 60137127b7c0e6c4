// Run history models (one record per journal invocation)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Unknown,
    Success,
    Failed,
}

/// Aggregate of every journal entry sharing one INVOCATION_ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub invocation_id: String,
    pub start_ms: Option<u64>,
    pub start_iso: Option<String>,
    pub end_ms: Option<u64>,
    pub end_iso: Option<String>,
    pub duration_ms: Option<u64>,
    pub status: RunStatus,
    pub cpu_usage_nsec: Option<u64>,
}

/// Run listing for a unit; `log_unit` is the unit the journal was actually
/// queried for (a timer resolves to the service it activates).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunHistory {
    pub log_unit: String,
    pub runs: Vec<RunRecord>,
}
