// Parsers for systemctl table and JSON output

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::{TimerEntry, UnitStatus, ms_to_iso, usec_to_ms};
use crate::validate;

/// State bullets and tree-drawing characters systemctl prefixes rows with.
const DECORATION: &[char] = &[' ', '\t', '●', '○', '×', '*', '├', '└', '│', '─'];

fn strip_decoration(line: &str) -> &str {
    line.trim_start_matches(DECORATION).trim_end()
}

/// Whitespace split into at most `max` columns; the last keeps inner spaces.
fn split_columns(s: &str, max: usize) -> Vec<&str> {
    let mut cols = Vec::new();
    let mut rest = s;
    while cols.len() + 1 < max {
        match rest.split_once(char::is_whitespace) {
            Some((head, tail)) => {
                cols.push(head);
                rest = tail.trim_start();
                if rest.is_empty() {
                    return cols;
                }
            }
            None => {
                cols.push(rest);
                return cols;
            }
        }
    }
    cols.push(rest);
    cols
}

/// `list-unit-files` rows: unit name and unit-file state. Newer systemd
/// appends a PRESET column; only the second column is the state.
fn parse_unit_files(text: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for line in text.lines() {
        let s = strip_decoration(line);
        if s.is_empty() {
            continue;
        }
        let mut cols = s.split_whitespace();
        let (Some(unit), Some(state)) = (cols.next(), cols.next()) else {
            continue;
        };
        out.insert(unit.to_string(), state.to_string());
    }
    out
}

struct UnitRow {
    load_state: String,
    active_state: String,
    sub_state: String,
    description: String,
}

/// `list-units` rows: UNIT LOAD ACTIVE SUB DESCRIPTION.
fn parse_units(text: &str) -> BTreeMap<String, UnitRow> {
    let mut out = BTreeMap::new();
    for line in text.lines() {
        let s = strip_decoration(line);
        if s.is_empty() {
            continue;
        }
        let cols = split_columns(s, 5);
        if cols.len() < 4 {
            continue;
        }
        out.insert(
            cols[0].to_string(),
            UnitRow {
                load_state: cols[1].to_string(),
                active_state: cols[2].to_string(),
                sub_state: cols[3].to_string(),
                description: cols.get(4).copied().unwrap_or("").to_string(),
            },
        );
    }
    out
}

/// Merge the unit-file table with the live unit table, keyed and sorted by
/// unit name. A unit missing from one table simply omits those fields.
pub(super) fn merge_unit_tables(unit_files: &str, units: &str) -> Vec<UnitStatus> {
    let mut merged: BTreeMap<String, UnitStatus> = BTreeMap::new();
    for (unit, state) in parse_unit_files(unit_files) {
        let entry = merged.entry(unit.clone()).or_insert_with(|| UnitStatus {
            unit,
            ..Default::default()
        });
        entry.unit_file_state = Some(state);
    }
    for (unit, row) in parse_units(units) {
        let entry = merged.entry(unit.clone()).or_insert_with(|| UnitStatus {
            unit,
            ..Default::default()
        });
        entry.load_state = Some(row.load_state);
        entry.active_state = Some(row.active_state);
        entry.sub_state = Some(row.sub_state);
        entry.description = Some(row.description);
    }
    merged.into_values().collect()
}

/// Live-unit rows only (e.g. the target listing), sorted by unit name.
pub(super) fn units_from_rows(text: &str) -> Vec<UnitStatus> {
    parse_units(text)
        .into_iter()
        .map(|(unit, row)| UnitStatus {
            unit,
            unit_file_state: None,
            load_state: Some(row.load_state),
            active_state: Some(row.active_state),
            sub_state: Some(row.sub_state),
            description: Some(row.description),
        })
        .collect()
}

/// `list-timers --output=json` row; `next`/`last` arrive as integer
/// microseconds, decimal strings, or null depending on systemd version.
#[derive(Deserialize)]
struct RawTimer {
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    activates: Option<String>,
    #[serde(default)]
    next: Option<Value>,
    #[serde(default)]
    last: Option<Value>,
}

pub(super) fn parse_timers(json_text: &str) -> Result<Vec<TimerEntry>, serde_json::Error> {
    let text = json_text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawTimer> = serde_json::from_str(text)?;
    let mut timers: Vec<TimerEntry> = raw
        .into_iter()
        .map(|t| {
            let next_ms = usec_to_ms(t.next.as_ref());
            let last_ms = usec_to_ms(t.last.as_ref());
            TimerEntry {
                timer: t.unit,
                activates: t.activates,
                next_iso: ms_to_iso(next_ms),
                next_ms,
                last_iso: ms_to_iso(last_ms),
                last_ms,
            }
        })
        .collect();
    timers.sort_by(|a, b| a.timer.cmp(&b.timer));
    Ok(timers)
}

/// `key=value` lines from `systemctl show`.
pub(super) fn parse_show_properties(text: &str) -> BTreeMap<String, String> {
    text.lines()
        .filter_map(|l| l.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Valid unit names from `list-dependencies --plain` output; tokens that are
/// not unit names (tree residue, empty lines) are skipped.
pub(super) fn dependency_units(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        let s = line.trim_start_matches(DECORATION);
        let Some(first) = s.split_whitespace().next() else {
            continue;
        };
        if validate::is_valid_unit_name(first) {
            out.push(first.to_string());
        }
    }
    out
}
