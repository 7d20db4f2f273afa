//! Root of the `trovelink-core` library.
//!
//! Resolves externally-supplied links (push notifications, shares, QR
//! codes, OS link activation) into validated in-app destinations, and
//! survives the mobile process lifecycle while doing it: links that
//! arrive before the navigation layer is ready are persisted and
//! replayed, and remote uncertainty fails closed.

// Library code must not write to stdout/stderr directly; everything
// user-visible goes through the tracing stack or the returned values.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod collaborators;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod existence;
pub mod generator;
pub mod parser;
pub mod queue;
pub mod router;
pub mod service;
pub mod store;
pub mod validator;

pub use collaborators::KeyValueStore;
pub use collaborators::Navigator;
pub use collaborators::SessionProvider;
pub use collaborators::StoreError;
pub use config::LinkConfig;
pub use events::LinkEvent;
pub use existence::ExistenceChecker;
pub use generator::GeneratedLink;
pub use queue::QueuedLink;
pub use router::ErrorScreen;
pub use service::DeepLinkService;
pub use store::FileStore;
pub use store::MemoryStore;
