//! Shared test doubles for the integration suite.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use trovelink_core::Navigator;
use trovelink_core::SessionProvider;

/// Navigator that records every dispatch and whose readiness can be
/// flipped mid-test, including dropping out after a set number of
/// dispatches to model navigation going away mid-drain.
#[derive(Debug)]
pub struct RecordingNavigator {
    ready: AtomicBool,
    ready_budget: AtomicUsize,
    dispatched: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl Default for RecordingNavigator {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            ready_budget: AtomicUsize::new(usize::MAX),
            dispatched: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingNavigator {
    pub fn ready() -> Self {
        let navigator = Self::default();
        navigator.set_ready(true);
        navigator
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
        if ready {
            self.ready_budget.store(usize::MAX, Ordering::SeqCst);
        }
    }

    /// Stay ready for the next `dispatches` navigations, then report
    /// un-ready until [`Self::set_ready`] is called again.
    pub fn drop_ready_after(&self, dispatches: usize) {
        self.ready_budget.store(dispatches, Ordering::SeqCst);
    }

    pub fn dispatched(&self) -> Vec<(String, HashMap<String, String>)> {
        self.dispatched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn dispatched_screens(&self) -> Vec<String> {
        self.dispatched()
            .into_iter()
            .map(|(screen, _)| screen)
            .collect()
    }
}

impl Navigator for RecordingNavigator {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn navigate(&self, screen: &str, params: &HashMap<String, String>) {
        self.dispatched
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((screen.to_string(), params.clone()));
        if self.ready_budget.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.ready.store(false, Ordering::SeqCst);
        }
    }
}

/// Session provider with a fixed token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    token: Option<String>,
}

impl StaticSession {
    pub fn authenticated(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn access_token(&self) -> Option<String> {
        self.token.clone()
    }
}
