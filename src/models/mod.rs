// Wire models (field names match the JSON API)

mod run;
mod schedule;
mod time;
mod unit;

pub use run::{RunHistory, RunRecord, RunStatus};
pub use schedule::{Schedule, ScheduleKind, TimerEntry};
pub use time::{json_u64, ms_to_iso, usec_to_ms};
pub use unit::{UnitDetail, UnitStatus};
