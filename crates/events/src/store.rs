//! Observable state container.

use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use lithia_core::Reducer;

use crate::action::Action;
use crate::subscription::Subscription;

/// Notification published after a store accepted an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// `Action::action_type` of the accepted action.
    pub action_type: String,
    /// Store version after the action (starts at 0, +1 per accepted action).
    pub version: u64,
}

/// Single-owner container for one screen view-model.
///
/// - No IO, no locking: the owning event-handling thread drives it through
///   `&mut self`.
/// - Rejected actions leave the state and version untouched and notify nobody.
/// - Fan-out is best effort: subscribers whose handle was dropped are pruned.
#[derive(Debug)]
pub struct Store<S> {
    state: S,
    version: u64,
    subscribers: Vec<mpsc::Sender<Change>>,
}

impl<S> Store<S>
where
    S: Reducer,
    S::Action: Action,
{
    pub fn new(state: S) -> Self {
        Self {
            state,
            version: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe(&mut self) -> Subscription<Change> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        Subscription::new(rx)
    }

    /// Apply `action` through the view-model's reducer.
    ///
    /// Returns the new store version.
    pub fn dispatch(&mut self, action: S::Action) -> Result<u64, S::Error> {
        let action_type = action.action_type();
        match self.state.reduce(&action) {
            Ok(next) => {
                self.state = next;
                self.version += 1;
                tracing::debug!(action = action_type, version = self.version, "action applied");
                self.publish(Change {
                    action_type: action_type.to_string(),
                    version: self.version,
                });
                Ok(self.version)
            }
            Err(error) => {
                tracing::warn!(action = action_type, ?error, "action rejected");
                Err(error)
            }
        }
    }

    /// Swap in a fresh state (e.g. reseeding a screen) and notify subscribers.
    pub fn reset(&mut self, state: S) {
        self.state = state;
        self.version += 1;
        self.publish(Change {
            action_type: "store.reset".to_string(),
            version: self.version,
        });
    }

    fn publish(&mut self, change: Change) {
        // Drop any dead subscribers while publishing.
        self.subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}
