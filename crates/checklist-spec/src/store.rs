//! Owned configuration with change notification.
//!
//! Callers that render outputs register a callback instead of re-reading the
//! configuration on a timer; every mutation goes through the store and is
//! pushed to subscribers in registration order.

use tracing::info;

use crate::config::ChecklistConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ChecklistConfig)>;

pub struct ConfigStore {
    config: ChecklistConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(ChecklistConfig::default())
    }
}

impl ConfigStore {
    pub fn new(config: ChecklistConfig) -> Self {
        Self {
            config,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &ChecklistConfig {
        &self.config
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ChecklistConfig) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Applies `change` and notifies subscribers, returning its result.
    pub fn update<R>(&mut self, change: impl FnOnce(&mut ChecklistConfig) -> R) -> R {
        let result = change(&mut self.config);
        self.notify();
        result
    }

    pub fn replace(&mut self, config: ChecklistConfig) {
        self.update(|current| *current = config);
    }

    pub fn reset(&mut self) {
        info!("configuration reset to defaults");
        self.replace(ChecklistConfig::default());
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.config);
        }
    }
}
