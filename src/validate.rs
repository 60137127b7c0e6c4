// Request input validation shared by repos and routes

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const MAX_UNIT_NAME_LEN: usize = 200;

pub const DEFAULT_RUN_LIMIT: u32 = 10;
pub const MAX_RUN_LIMIT: u32 = 50;
pub const DEFAULT_LOG_LIMIT: u32 = 400;
pub const MAX_LOG_LIMIT: u32 = 5000;

static UNIT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9:._@-]+$").expect("unit name pattern"));
static INVOCATION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{32}$").expect("invocation id pattern"));

// Error texts are part of the wire format (serialized into the error body).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid unit")]
    InvalidUnit,

    #[error("invalid invocation")]
    InvalidInvocation,

    #[error("invalid limit")]
    InvalidLimit,
}

/// True for syntactically valid unit names (also used to filter tokens out
/// of dependency-tree output, where invalid tokens are skipped, not errors).
pub fn is_valid_unit_name(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_UNIT_NAME_LEN && UNIT_NAME.is_match(s)
}

pub fn unit_name(s: &str) -> Result<(), ValidationError> {
    if is_valid_unit_name(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUnit)
    }
}

pub fn invocation_id(s: &str) -> Result<(), ValidationError> {
    if INVOCATION_ID.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidInvocation)
    }
}

/// Limits are 1..=max; 0 and anything above the cap are rejected.
pub fn limit(n: u32, max: u32) -> Result<(), ValidationError> {
    if (1..=max).contains(&n) {
        Ok(())
    } else {
        Err(ValidationError::InvalidLimit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_unit_names() {
        for name in [
            "nginx.service",
            "systemd-tmpfiles-clean.timer",
            "multi-user.target",
            "getty@tty1.service",
            "dbus-:1.2-org.freedesktop.hostname1@0.service",
        ] {
            assert!(is_valid_unit_name(name), "{name}");
        }
    }

    #[test]
    fn rejects_bad_unit_names() {
        assert!(unit_name("").is_err());
        assert!(unit_name("a b.service").is_err());
        assert!(unit_name("../etc/passwd").is_err());
        assert!(unit_name("unit;rm").is_err());
        assert!(unit_name(&"x".repeat(MAX_UNIT_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn invocation_id_must_be_32_hex() {
        assert!(invocation_id("0123456789abcdef0123456789abcdef").is_ok());
        assert!(invocation_id("0123456789ABCDEF0123456789ABCDEF").is_err());
        assert!(invocation_id("0123456789abcdef0123456789abcde").is_err());
        assert!(invocation_id("").is_err());
    }

    #[test]
    fn limit_bounds() {
        assert!(limit(1, MAX_RUN_LIMIT).is_ok());
        assert!(limit(MAX_RUN_LIMIT, MAX_RUN_LIMIT).is_ok());
        assert!(limit(0, MAX_RUN_LIMIT).is_err());
        assert!(limit(MAX_RUN_LIMIT + 1, MAX_RUN_LIMIT).is_err());
    }
}
