// Unit status and detail models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the merged unit listing. Fields are present only when the
/// corresponding systemctl table (unit files / live units) listed the unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitStatus {
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_file_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `systemctl show` properties plus the raw `systemctl cat` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDetail {
    pub unit: String,
    pub properties: BTreeMap<String, String>,
    pub cat: String,
}
