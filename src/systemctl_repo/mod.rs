// systemd unit/timer state via systemctl

mod parse;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::exec::CommandRunner;
use crate::models::{Schedule, ScheduleKind, TimerEntry, UnitDetail, UnitStatus};
use crate::validate;

const SYSTEMCTL: &str = "systemctl";

const LIST_TIMEOUT: Duration = Duration::from_secs(8);
const SHOW_TIMEOUT: Duration = Duration::from_secs(6);
const DEPS_TIMEOUT: Duration = Duration::from_secs(10);

/// Properties requested from `systemctl show` for the unit detail view.
const SHOW_PROPERTIES: &[&str] = &[
    "Id",
    "Description",
    "LoadState",
    "ActiveState",
    "SubState",
    "UnitFileState",
    "FragmentPath",
    "DropInPaths",
    "Documentation",
    "After",
    "Requires",
    "Wants",
];

pub struct SystemctlRepo {
    runner: Arc<dyn CommandRunner>,
}

impl SystemctlRepo {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    /// Unit-file states merged with live unit state, sorted by unit name.
    pub async fn list_units(&self) -> Result<Vec<UnitStatus>> {
        let unit_files = self
            .runner
            .run(
                SYSTEMCTL,
                &["list-unit-files", "--no-pager", "--no-legend"],
                LIST_TIMEOUT,
            )
            .await?;
        let units = self
            .runner
            .run(
                SYSTEMCTL,
                &["list-units", "--all", "--no-pager", "--no-legend"],
                LIST_TIMEOUT,
            )
            .await?;
        Ok(parse::merge_unit_tables(&unit_files, &units))
    }

    pub async fn list_targets(&self) -> Result<Vec<UnitStatus>> {
        let out = self
            .runner
            .run(
                SYSTEMCTL,
                &[
                    "list-units",
                    "--type=target",
                    "--all",
                    "--no-pager",
                    "--no-legend",
                ],
                LIST_TIMEOUT,
            )
            .await?;
        Ok(parse::units_from_rows(&out))
    }

    /// All timers with their next/last fire times, sorted by timer unit.
    pub async fn list_timers(&self) -> Result<Vec<TimerEntry>> {
        let out = self
            .runner
            .run(
                SYSTEMCTL,
                &["list-timers", "--all", "--no-pager", "--output=json"],
                LIST_TIMEOUT,
            )
            .await?;
        parse::parse_timers(&out).map_err(Error::TimerJson)
    }

    /// Schedule for one unit: a timer reports its own entry, a service the
    /// soonest timer that activates it, anything else has no schedule.
    pub async fn schedule_for_unit(&self, unit: &str) -> Result<Schedule> {
        validate::unit_name(unit)?;

        if unit.ends_with(".timer") {
            let timers = self.list_timers().await?;
            let entry = timers
                .into_iter()
                .find(|t| t.timer.as_deref() == Some(unit))
                .unwrap_or_default();
            return Ok(Schedule::Scheduled {
                unit: unit.to_string(),
                kind: ScheduleKind::Timer,
                timer: Some(unit.to_string()),
                activates: entry.activates,
                next_ms: entry.next_ms,
                next_iso: entry.next_iso,
                last_ms: entry.last_ms,
                last_iso: entry.last_iso,
            });
        }

        if unit.ends_with(".service") {
            let timers = self.list_timers().await?;
            let mut candidates: Vec<TimerEntry> = timers
                .into_iter()
                .filter(|t| t.activates.as_deref() == Some(unit))
                .collect();
            // Timers that will never fire again sort last.
            candidates.sort_by_key(|t| (t.next_ms.is_none(), t.next_ms));
            let entry = candidates.into_iter().next().unwrap_or_default();
            return Ok(Schedule::Scheduled {
                unit: unit.to_string(),
                kind: ScheduleKind::Service,
                timer: entry.timer,
                activates: Some(unit.to_string()),
                next_ms: entry.next_ms,
                next_iso: entry.next_iso,
                last_ms: entry.last_ms,
                last_iso: entry.last_iso,
            });
        }

        Ok(Schedule::Other {
            unit: unit.to_string(),
            kind: ScheduleKind::Other,
        })
    }

    /// A timer's journal entries live under the unit it activates.
    pub async fn resolve_log_unit(&self, unit: &str) -> Result<String> {
        if unit.ends_with(".timer") {
            let schedule = self.schedule_for_unit(unit).await?;
            if let Some(activates) = schedule.activates()
                && validate::is_valid_unit_name(activates)
            {
                return Ok(activates.to_string());
            }
        }
        Ok(unit.to_string())
    }

    /// Unit listing restricted to the dependency closure of the given
    /// targets. Invalid or non-target arguments are skipped; when nothing
    /// usable remains the full listing is returned.
    pub async fn units_for_targets(&self, targets: &[String]) -> Result<Vec<UnitStatus>> {
        if targets.is_empty() {
            return self.list_units().await;
        }

        let mut wanted: HashSet<String> = HashSet::new();
        for target in targets {
            if !validate::is_valid_unit_name(target) || !target.ends_with(".target") {
                continue;
            }
            let deps = self
                .runner
                .run(
                    SYSTEMCTL,
                    &[
                        "list-dependencies",
                        "--all",
                        "--plain",
                        "--no-pager",
                        "--no-legend",
                        "--",
                        target,
                    ],
                    DEPS_TIMEOUT,
                )
                .await?;
            wanted.insert(target.clone());
            wanted.extend(parse::dependency_units(&deps));
        }

        if wanted.is_empty() {
            return self.list_units().await;
        }
        let units = self.list_units().await?;
        Ok(units
            .into_iter()
            .filter(|u| wanted.contains(&u.unit))
            .collect())
    }

    /// `systemctl show` (restricted property set) plus `systemctl cat`.
    pub async fn unit_detail(&self, unit: &str) -> Result<UnitDetail> {
        validate::unit_name(unit)?;

        let mut args: Vec<&str> = vec!["show", "--no-pager"];
        for p in SHOW_PROPERTIES.iter().copied() {
            args.push("-p");
            args.push(p);
        }
        args.push("--");
        args.push(unit);
        let props_out = self.runner.run(SYSTEMCTL, &args, SHOW_TIMEOUT).await?;

        let cat = self
            .runner
            .run(SYSTEMCTL, &["cat", "--no-pager", "--", unit], SHOW_TIMEOUT)
            .await?;

        Ok(UnitDetail {
            unit: unit.to_string(),
            properties: parse::parse_show_properties(&props_out),
            cat,
        })
    }
}
