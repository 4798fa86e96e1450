use crate::domain::model::{ChangeKind, NonTaxableChange, SubscriptionId, DEFAULT_STORE_KEY};
use crate::domain::ports::KeyValueStore;
use std::collections::HashSet;

type Callback = Box<dyn Fn(&NonTaxableChange) + Send + Sync>;

/// Category identifiers whose tax checkbox defaults to unchecked.
///
/// The set lives in memory and is mirrored to a single slot of a
/// [`KeyValueStore`]. Every mutation writes the full set back immediately
/// and then notifies subscribers. Storage faults are logged and never
/// surfaced: an unreadable slot loads as the empty set, a failed write
/// leaves the in-memory change in place.
pub struct NonTaxableCategorySet<S: KeyValueStore> {
    store: S,
    key: String,
    members: HashSet<String>,
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> NonTaxableCategorySet<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            members: HashSet::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the in-memory set with whatever the store holds.
    pub fn load(&mut self) {
        let stored = match self.store.string_array(&self.key) {
            Ok(Some(values)) => values,
            Ok(None) => {
                tracing::debug!("No value stored under '{}', starting empty", self.key);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read '{}', starting empty: {}", self.key, e);
                Vec::new()
            }
        };

        self.members = stored.into_iter().collect();
        tracing::debug!("Loaded {} non-taxable categories", self.members.len());
        self.notify(ChangeKind::Loaded);
    }

    pub fn is_non_taxable(&self, category_id: &str) -> bool {
        self.members.contains(category_id)
    }

    pub fn set_non_taxable(&mut self, category_id: impl Into<String>, value: bool) {
        let category_id = category_id.into();
        if value {
            self.members.insert(category_id.clone());
        } else {
            self.members.remove(&category_id);
        }

        tracing::info!("Category '{}' non-taxable = {}", category_id, value);
        self.persist();
        self.notify(ChangeKind::Flagged {
            category_id,
            non_taxable: value,
        });
    }

    /// Full replacement, not a merge. Duplicates in `category_ids` collapse.
    pub fn set_all_non_taxable<I, T>(&mut self, category_ids: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.members = category_ids.into_iter().map(Into::into).collect();

        tracing::info!("Replaced non-taxable categories ({} total)", self.members.len());
        self.persist();
        self.notify(ChangeKind::Replaced);
    }

    pub fn clear_all(&mut self) {
        self.members.clear();

        tracing::info!("Cleared all non-taxable categories");
        self.persist();
        self.notify(ChangeKind::Cleared);
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Sorted snapshot of the current members.
    pub fn members(&self) -> Vec<String> {
        let mut members: Vec<String> = self.members.iter().cloned().collect();
        members.sort();
        members
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&NonTaxableChange) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    fn persist(&self) {
        if let Err(e) = self.store.set_string_array(&self.key, &self.members()) {
            tracing::warn!("Failed to persist '{}': {}", self.key, e);
        }
    }

    fn notify(&self, kind: ChangeKind) {
        if self.subscribers.is_empty() {
            return;
        }

        let change = NonTaxableChange {
            kind,
            members: self.members(),
        };
        for (_, callback) in &self.subscribers {
            callback(&change);
        }
    }
}

impl<S: KeyValueStore> std::fmt::Debug for NonTaxableCategorySet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonTaxableCategorySet")
            .field("key", &self.key)
            .field("members", &self.members())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
