//! Screen mapping and dispatch.
//!
//! Owns the total `LinkTarget` → screen table, including the renaming
//! of validated fields to the parameter names the destination screens
//! expect. The inverse (outbound) table lives with the generator; the
//! two stay separate so inbound and outbound translation do not depend
//! on each other.

use std::collections::HashMap;

use tracing::debug;

use trovelink_protocol::LinkTarget;

use crate::collaborators::Navigator;

/// A concrete navigation instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationInstruction {
    pub screen: &'static str,
    pub params: HashMap<String, String>,
}

/// Resolve the target screen and parameter bag for a validated link.
pub fn instruction_for(target: LinkTarget) -> NavigationInstruction {
    let (screen, params) = match target {
        LinkTarget::Profile { user_id } => (
            "Profile",
            HashMap::from([("userId".to_string(), user_id.to_string())]),
        ),
        LinkTarget::Moment { moment_id } => (
            "MomentDetail",
            HashMap::from([("momentId".to_string(), moment_id.to_string())]),
        ),
        LinkTarget::Gift { gift_id } => (
            "GiftDetail",
            HashMap::from([("giftId".to_string(), gift_id.to_string())]),
        ),
        // The chat screen takes its room by `roomId`, not the
        // validated `conversationId`.
        LinkTarget::Chat { conversation_id } => (
            "ChatRoom",
            HashMap::from([("roomId".to_string(), conversation_id.to_string())]),
        ),
        LinkTarget::Request { request_id } => (
            "RequestDetail",
            HashMap::from([("requestId".to_string(), request_id.to_string())]),
        ),
        LinkTarget::Notifications => ("NotificationCenter", HashMap::new()),
        LinkTarget::Settings => ("Settings", HashMap::new()),
    };
    NavigationInstruction { screen, params }
}

/// Dispatch an instruction if the navigator is ready.
///
/// Returns whether the side effect happened. The caller reports the
/// resolved instruction either way, so resolution can be observed
/// without depending on navigator state. Repeating an identical
/// dispatch is safe; navigation de-duplicates or re-renders.
pub fn dispatch(navigator: &dyn Navigator, instruction: &NavigationInstruction) -> bool {
    if !navigator.is_ready() {
        return false;
    }
    debug!(screen = instruction.screen, "dispatching navigation");
    navigator.navigate(instruction.screen, &instruction.params);
    true
}
