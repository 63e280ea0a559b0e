//! Change-notification boundary for reload-on-change.
//!
//! Watching the file system is an external collaborator's job; this module
//! only defines the subscription contract, plus an in-process notifier for
//! tests and for embedders that drive their own watcher.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Callback invoked when a watched file changes.
pub type ChangeCallback = Box<dyn Fn() + Send + Sync>;

/// Subscription contract implemented by the external file watcher.
pub trait ChangeNotifier: Send + Sync {
    /// Register `callback` to run whenever the file at `path` changes.
    fn subscribe(&self, path: &Path, callback: ChangeCallback);
}

/// In-process notifier that fires subscriptions on demand.
#[derive(Default)]
pub struct ManualNotifier {
    subscriptions: Mutex<HashMap<PathBuf, Vec<ChangeCallback>>>,
}

impl ManualNotifier {
    /// Create a notifier with no subscriptions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every callback registered for `path`.
    pub fn notify(&self, path: &Path) {
        let subscriptions = self
            .subscriptions
            .lock()
            .expect("subscription lock poisoned");
        if let Some(callbacks) = subscriptions.get(path) {
            for callback in callbacks {
                callback();
            }
        }
    }
}

impl ChangeNotifier for ManualNotifier {
    fn subscribe(&self, path: &Path, callback: ChangeCallback) {
        self.subscriptions
            .lock()
            .expect("subscription lock poisoned")
            .entry(path.to_path_buf())
            .or_default()
            .push(callback);
    }
}
