//! Intermediate outcomes of the resolution pipeline: schema validation
//! and the remote existence probe.

use serde::Deserialize;
use serde::Serialize;

use crate::link::LinkTarget;

/// Result of validating a parsed link's parameters against its type's
/// schema. Types with no schema are always `Valid`; their targets carry
/// no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid { data: LinkTarget },
    Invalid { message: String },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }
}

/// Classification of a remote existence probe.
///
/// Invariants: `network_error` implies `!exists` (fail closed), and
/// `expired` implies `!exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistenceOutcome {
    pub exists: bool,
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub network_error: bool,
}

impl ExistenceOutcome {
    /// Resource confirmed present (2xx), or assumed present because no
    /// probe could be authorized.
    pub fn present(status_code: Option<u16>) -> Self {
        Self {
            exists: true,
            expired: false,
            status_code,
            network_error: false,
        }
    }

    /// Resource confirmed absent (404).
    pub fn absent(status_code: u16) -> Self {
        Self {
            exists: false,
            expired: false,
            status_code: Some(status_code),
            network_error: false,
        }
    }

    /// Resource confirmed gone (410); distinct messaging from absent.
    pub fn gone() -> Self {
        Self {
            exists: false,
            expired: true,
            status_code: Some(410),
            network_error: false,
        }
    }

    /// Transport-level failure: fail closed, do not reveal the target.
    pub fn transport_failure() -> Self {
        Self {
            exists: false,
            expired: false,
            status_code: None,
            network_error: true,
        }
    }

    /// The probe was answered with 401/403: the resource exists but the
    /// caller lacks access. The normal auth gate handles it downstream.
    pub fn unauthorized(self) -> bool {
        self.exists && matches!(self.status_code, Some(401) | Some(403))
    }
}
