// Journal timestamp conversions

use serde_json::Value;

/// Journal fields carry unsigned integers either as JSON numbers or as
/// decimal strings. Anything else is treated as absent.
pub fn json_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Microseconds-since-epoch to milliseconds; zero/absent means "never".
pub fn usec_to_ms(v: Option<&Value>) -> Option<u64> {
    let n = json_u64(v?)?;
    if n == 0 { None } else { Some(n / 1000) }
}

/// Epoch milliseconds to an RFC 3339 UTC string.
pub fn ms_to_iso(ms: Option<u64>) -> Option<String> {
    let ms = ms?;
    let dt = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(i64::try_from(ms).ok()?)?;
    Some(dt.to_rfc3339())
}
