//! Wire-level contract for the Trove deep-link subsystem.
//!
//! This crate holds the typed grammar over untrusted link input and the
//! outcome types the resolution pipeline reports. It is deliberately
//! dependency-light so that hosts (app shell, notification handlers,
//! share sheets) can consume the contract without pulling in the
//! resolution machinery from `trovelink-core`.

pub mod link;
pub mod outcome;
pub mod result;

pub use link::Attribution;
pub use link::LinkOptions;
pub use link::LinkTarget;
pub use link::LinkType;
pub use link::ParsedLink;
pub use outcome::ExistenceOutcome;
pub use outcome::ValidationOutcome;
pub use result::LinkError;
pub use result::LinkErrorCode;
pub use result::LinkResult;
