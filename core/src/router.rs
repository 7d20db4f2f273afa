//! Maps failure codes to dedicated error destinations.
//!
//! Only consulted for non-queued failures; a queued link is deferred,
//! not failed.

use trovelink_protocol::LinkErrorCode;
use trovelink_protocol::LinkResult;

/// The three dedicated error destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScreen {
    LinkExpired,
    LinkNotFound,
    LinkInvalid,
}

impl ErrorScreen {
    pub fn screen_name(self) -> &'static str {
        match self {
            ErrorScreen::LinkExpired => "LinkExpired",
            ErrorScreen::LinkNotFound => "LinkNotFound",
            ErrorScreen::LinkInvalid => "LinkInvalid",
        }
    }
}

/// Destination for a failure code.
///
/// `Unauthorized` deliberately routes nowhere: the app's normal
/// authentication gate handles it. Every other code without a dedicated
/// destination falls through to the generic invalid screen.
pub fn screen_for_code(code: LinkErrorCode) -> Option<ErrorScreen> {
    match code {
        LinkErrorCode::Expired => Some(ErrorScreen::LinkExpired),
        LinkErrorCode::NotFound => Some(ErrorScreen::LinkNotFound),
        LinkErrorCode::Unauthorized => None,
        LinkErrorCode::InvalidUrl
        | LinkErrorCode::InvalidParams
        | LinkErrorCode::NetworkError
        | LinkErrorCode::Unknown => Some(ErrorScreen::LinkInvalid),
    }
}

/// Destination for a finished result, if it warrants one.
pub fn screen_for_result(result: &LinkResult) -> Option<ErrorScreen> {
    result.error_code().and_then(screen_for_code)
}
