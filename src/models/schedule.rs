// Timer listing and per-unit schedule models

use serde::{Deserialize, Serialize};

/// One row of `systemctl list-timers`, times converted to epoch ms + RFC 3339.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerEntry {
    pub timer: Option<String>,
    pub activates: Option<String>,
    pub next_ms: Option<u64>,
    pub next_iso: Option<String>,
    pub last_ms: Option<u64>,
    pub last_iso: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    Timer,
    Service,
    Other,
}

/// Schedule answer for a single unit. Units that are neither timers nor
/// services get the bare `{unit, kind}` shape with no schedule fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Schedule {
    #[serde(rename_all = "camelCase")]
    Scheduled {
        unit: String,
        kind: ScheduleKind,
        timer: Option<String>,
        activates: Option<String>,
        next_ms: Option<u64>,
        next_iso: Option<String>,
        last_ms: Option<u64>,
        last_iso: Option<String>,
    },
    Other { unit: String, kind: ScheduleKind },
}

impl Schedule {
    pub fn kind(&self) -> ScheduleKind {
        match self {
            Schedule::Scheduled { kind, .. } | Schedule::Other { kind, .. } => *kind,
        }
    }

    /// Timer unit backing this schedule, if any.
    pub fn timer(&self) -> Option<&str> {
        match self {
            Schedule::Scheduled { timer, .. } => timer.as_deref(),
            Schedule::Other { .. } => None,
        }
    }

    /// Unit a timer activates, if known.
    pub fn activates(&self) -> Option<&str> {
        match self {
            Schedule::Scheduled { activates, .. } => activates.as_deref(),
            Schedule::Other { .. } => None,
        }
    }
}
