use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, Utc};

use crate::domain::customer::{CustomerId, CustomerProfile};
use crate::domain::session::NegotiationSession;

pub const DEFAULT_HISTORY_CAP: usize = 10;

/// In-process store owning the three per-customer aggregates:
/// profile, conversation history and active negotiation session. The
/// aggregates are independent mappings over the same key and never
/// share state across customers.
#[derive(Debug)]
pub struct SessionStore {
    profiles: Mutex<HashMap<CustomerId, CustomerProfile>>,
    histories: Mutex<HashMap<CustomerId, VecDeque<String>>>,
    sessions: Mutex<HashMap<CustomerId, NegotiationSession>>,
    locks: Mutex<HashMap<CustomerId, Arc<Mutex<()>>>>,
    history_cap: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::with_history_cap(DEFAULT_HISTORY_CAP)
    }

    pub fn with_history_cap(history_cap: usize) -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            histories: Mutex::new(HashMap::new()),
            sessions: Mutex::new(HashMap::new()),
            locks: Mutex::new(HashMap::new()),
            history_cap,
        }
    }

    /// Returns the customer's profile, creating a defaulted one on
    /// first contact. Total: never fails for a well-formed id.
    pub fn get_or_create_profile(
        &self,
        customer_id: &CustomerId,
        display_name: &str,
    ) -> CustomerProfile {
        lock(&self.profiles)
            .entry(customer_id.clone())
            .or_insert_with(|| CustomerProfile::new(customer_id.clone(), display_name))
            .clone()
    }

    pub fn profile(&self, customer_id: &CustomerId) -> Option<CustomerProfile> {
        lock(&self.profiles).get(customer_id).cloned()
    }

    pub fn with_profile_mut<F>(&self, customer_id: &CustomerId, update: F)
    where
        F: FnOnce(&mut CustomerProfile),
    {
        if let Some(profile) = lock(&self.profiles).get_mut(customer_id) {
            update(profile);
        }
    }

    /// Appends one history entry, evicting the oldest entries once the
    /// sliding-window cap is exceeded. Insertion order is preserved.
    pub fn append_history(&self, customer_id: &CustomerId, entry: impl Into<String>) {
        let mut histories = lock(&self.histories);
        let history = histories.entry(customer_id.clone()).or_default();
        history.push_back(entry.into());
        while history.len() > self.history_cap {
            history.pop_front();
        }
    }

    pub fn history(&self, customer_id: &CustomerId) -> Vec<String> {
        lock(&self.histories)
            .get(customer_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn active_session(&self, customer_id: &CustomerId) -> Option<NegotiationSession> {
        lock(&self.sessions).get(customer_id).cloned()
    }

    pub fn set_session(&self, customer_id: &CustomerId, session: NegotiationSession) {
        lock(&self.sessions).insert(customer_id.clone(), session);
    }

    pub fn clear_session(&self, customer_id: &CustomerId) -> Option<NegotiationSession> {
        lock(&self.sessions).remove(customer_id)
    }

    /// Drops negotiation sessions opened longer than `max_age` ago and
    /// returns how many were removed. The store itself applies no TTL;
    /// the integrator decides when and how often to call this.
    pub fn expire_sessions_older_than(&self, max_age: Duration) -> usize {
        let cutoff = Utc::now() - max_age;
        let mut sessions = lock(&self.sessions);
        let before = sessions.len();
        sessions.retain(|_, session| session.opened_at >= cutoff);
        before - sessions.len()
    }

    /// Per-customer serialization handle. Holding the returned mutex
    /// across one message's read-modify-write cycle keeps concurrent
    /// offers for the same customer from interleaving; different
    /// customers never contend.
    pub fn customer_lock(&self, customer_id: &CustomerId) -> Arc<Mutex<()>> {
        lock(&self.locks).entry(customer_id.clone()).or_default().clone()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::SessionStore;
    use crate::domain::customer::{CustomerId, LanguageRegister};
    use crate::domain::session::NegotiationSession;

    #[test]
    fn first_contact_creates_a_defaulted_profile() {
        let store = SessionStore::new();
        let customer = CustomerId::from("+2348011111111");

        let profile = store.get_or_create_profile(&customer, "Ada");
        assert_eq!(profile.display_name, "Ada");
        assert_eq!(profile.interaction_count, 0);
        assert_eq!(profile.register, LanguageRegister::Standard);

        // Second call returns the same record, not a fresh default.
        store.with_profile_mut(&customer, |profile| profile.interaction_count += 1);
        let again = store.get_or_create_profile(&customer, "ignored");
        assert_eq!(again.display_name, "Ada");
        assert_eq!(again.interaction_count, 1);
    }

    #[test]
    fn history_keeps_a_sliding_window_of_ten_entries() {
        let store = SessionStore::new();
        let customer = CustomerId::from("c-window");

        for index in 0..17 {
            store.append_history(&customer, format!("entry-{index}"));
        }

        let history = store.history(&customer);
        assert_eq!(history.len(), 10);
        assert_eq!(history.first().map(String::as_str), Some("entry-7"));
        assert_eq!(history.last().map(String::as_str), Some("entry-16"));
    }

    #[test]
    fn aggregates_are_isolated_per_customer() {
        let store = SessionStore::new();
        let first = CustomerId::from("c-a");
        let second = CustomerId::from("c-b");

        store.append_history(&first, "hello");
        store.set_session(
            &first,
            NegotiationSession::open("Phone", Decimal::from(100_000), Decimal::new(75, 2)),
        );

        assert!(store.history(&second).is_empty());
        assert!(store.active_session(&second).is_none());
        assert!(store.profile(&second).is_none());
        assert!(store.active_session(&first).is_some());
    }

    #[test]
    fn clear_session_removes_only_the_session() {
        let store = SessionStore::new();
        let customer = CustomerId::from("c-clear");

        store.get_or_create_profile(&customer, "Ngozi");
        store.append_history(&customer, "hi");
        store.set_session(
            &customer,
            NegotiationSession::open("Bag", Decimal::from(5_000), Decimal::new(75, 2)),
        );

        assert!(store.clear_session(&customer).is_some());
        assert!(store.clear_session(&customer).is_none());
        assert!(store.profile(&customer).is_some());
        assert_eq!(store.history(&customer).len(), 1);
    }

    #[test]
    fn expiry_hook_removes_only_stale_sessions() {
        let store = SessionStore::new();
        let stale = CustomerId::from("c-stale");
        let fresh = CustomerId::from("c-fresh");

        let mut old_session =
            NegotiationSession::open("Fridge", Decimal::from(90_000), Decimal::new(75, 2));
        old_session.opened_at = Utc::now() - Duration::hours(48);
        store.set_session(&stale, old_session);
        store.set_session(
            &fresh,
            NegotiationSession::open("Shoes", Decimal::from(12_000), Decimal::new(75, 2)),
        );

        let removed = store.expire_sessions_older_than(Duration::hours(24));
        assert_eq!(removed, 1);
        assert!(store.active_session(&stale).is_none());
        assert!(store.active_session(&fresh).is_some());
    }

    #[test]
    fn customer_lock_is_stable_per_id() {
        let store = SessionStore::new();
        let customer = CustomerId::from("c-lock");

        let first = store.customer_lock(&customer);
        let second = store.customer_lock(&customer);
        assert!(std::sync::Arc::ptr_eq(&first, &second));

        let other = store.customer_lock(&CustomerId::from("c-other"));
        assert!(!std::sync::Arc::ptr_eq(&first, &other));
    }
}
