//! Check status values and roll-up ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a check category.
///
/// `Info` doubles as the unset state: a category that never received a
/// terminal mutation stays at `Info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl Status {
    /// Roll-up severity: ERROR > WARNING > SUCCESS > INFO.
    #[must_use]
    pub const fn severity(self) -> u8 {
        match self {
            Self::Error => 3,
            Self::Warning => 2,
            Self::Success => 1,
            Self::Info => 0,
        }
    }

    /// Whether the category ran to a terminal state.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Info)
    }

    /// Whether this status calls for troubleshooting output.
    #[must_use]
    pub const fn needs_attention(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }

    /// Icon-prefixed label matching the dashboard style.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "\u{2705} SUCCESS",
            Self::Warning => "\u{26a0}\u{fe0f} WARNING",
            Self::Error => "\u{274c} ERROR",
            Self::Info => "\u{2139}\u{fe0f} INFO",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Status::Error.severity() > Status::Warning.severity());
        assert!(Status::Warning.severity() > Status::Success.severity());
        assert!(Status::Success.severity() > Status::Info.severity());
    }

    #[test]
    fn info_is_unset() {
        assert!(!Status::Info.is_set());
        assert!(Status::Success.is_set());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Status::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
