//! The single outward contract of the resolution pipeline.
//!
//! Deep-link handling is advisory to the host app: every entry point
//! returns a [`LinkResult`] value and nothing is ever thrown across the
//! public boundary.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use thiserror::Error;

use crate::link::LinkType;

/// Closed failure taxonomy. Every internal fault maps onto exactly one
/// of these codes at the lowest level where it is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkErrorCode {
    /// Unparsable input or an unknown link type.
    InvalidUrl,
    /// Schema validation of path-derived parameters failed.
    InvalidParams,
    /// Resource confirmed absent.
    NotFound,
    /// Resource confirmed gone; distinct messaging from `NotFound`.
    Expired,
    /// Resource exists but the caller lacks access.
    Unauthorized,
    /// Transport failure surfaced explicitly at the caller's request.
    NetworkError,
    /// Unexpected internal fault; always paired with diagnostic detail.
    Unknown,
}

/// Structured failure carried inside a `LinkResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct LinkError {
    pub code: LinkErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LinkError {
    pub fn new(code: LinkErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Outcome of handling one link. Serializes to one of three shapes:
///
/// - `{"success":true,"type":...,"screen":...,"params":{...}}`
/// - `{"success":true,"queued":true}`
/// - `{"success":false,"error":{"code":...,"message":...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LinkResult {
    Resolved(ResolvedLink),
    Queued(QueuedAck),
    Failed(FailedLink),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub success: bool,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub screen: String,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueuedAck {
    pub success: bool,
    pub queued: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedLink {
    pub success: bool,
    pub error: LinkError,
}

impl LinkResult {
    pub fn resolved(
        link_type: LinkType,
        screen: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        LinkResult::Resolved(ResolvedLink {
            success: true,
            link_type,
            screen: screen.into(),
            params,
        })
    }

    pub fn queued() -> Self {
        LinkResult::Queued(QueuedAck {
            success: true,
            queued: true,
        })
    }

    pub fn failure(error: LinkError) -> Self {
        LinkResult::Failed(FailedLink {
            success: false,
            error,
        })
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, LinkResult::Failed(_))
    }

    pub fn error_code(&self) -> Option<LinkErrorCode> {
        match self {
            LinkResult::Failed(failed) => Some(failed.error.code),
            LinkResult::Resolved(_) | LinkResult::Queued(_) => None,
        }
    }
}
