//! In-memory keyed stores. Three independent maps back the whole service:
//! the quote cache (cache key → response), the quote index (quote id →
//! record), and the policy store with its endorsement/certificate lists.
//! Entries are only ever inserted or superseded, never deleted. The one
//! exception is the cache, which can be dropped wholesale for testing.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cachekey;
use crate::domain::policy::{Certificate, Endorsement, Policy};
use crate::domain::quote::{QuoteRecord, QuoteResponse};

/// Store state is cache-like; a poisoned lock carries no invariant worth
/// dying for, so recover the guard instead of propagating the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_cached_quotes: usize,
    pub total_quotes_by_id: usize,
    pub cache_keys: Vec<String>,
}

#[derive(Debug, Default)]
pub struct QuoteStore {
    cache: Mutex<HashMap<String, QuoteResponse>>,
    by_id: Mutex<HashMap<String, QuoteRecord>>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic per-key lookup-or-synthesize. The closure runs under the cache
    /// lock, so at most one caller can ever populate a given key; everyone
    /// else observes the stored response. Returns the response plus whether
    /// it came from the cache.
    pub fn lookup_or_insert_with(
        &self,
        key: &str,
        synthesize: impl FnOnce() -> QuoteResponse,
    ) -> (QuoteResponse, bool) {
        let mut cache = lock(&self.cache);
        if let Some(existing) = cache.get(key) {
            return (existing.clone(), true);
        }
        let response = synthesize();
        cache.insert(key.to_owned(), response.clone());
        (response, false)
    }

    pub fn index(&self, quote_id: impl Into<String>, record: QuoteRecord) {
        lock(&self.by_id).insert(quote_id.into(), record);
    }

    pub fn get(&self, quote_id: &str) -> Option<QuoteRecord> {
        lock(&self.by_id).get(quote_id).cloned()
    }

    pub fn stats(&self) -> CacheStats {
        let cache = lock(&self.cache);
        CacheStats {
            total_cached_quotes: cache.len(),
            total_quotes_by_id: lock(&self.by_id).len(),
            cache_keys: cache
                .keys()
                .map(|key| format!("{}...", cachekey::truncated(key)))
                .collect(),
        }
    }

    /// Drops only the response cache; the id index keeps serving binds.
    pub fn clear_cache(&self) {
        lock(&self.cache).clear();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub policy: Policy,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct PolicyStore {
    policies: Mutex<HashMap<String, PolicyRecord>>,
    endorsements: Mutex<HashMap<String, Vec<Endorsement>>>,
    certificates: Mutex<HashMap<String, Vec<Certificate>>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, policy: Policy) {
        let record = PolicyRecord { policy, created_at: Utc::now() };
        lock(&self.policies).insert(record.policy.policy_id.clone(), record);
    }

    pub fn policy(&self, policy_id: &str) -> Option<Policy> {
        lock(&self.policies).get(policy_id).map(|record| record.policy.clone())
    }

    /// Appends and returns the policy's endorsement count after the append.
    pub fn append_endorsement(&self, policy_id: &str, endorsement: Endorsement) -> usize {
        let mut endorsements = lock(&self.endorsements);
        let list = endorsements.entry(policy_id.to_owned()).or_default();
        list.push(endorsement);
        list.len()
    }

    pub fn endorsements(&self, policy_id: &str) -> Vec<Endorsement> {
        lock(&self.endorsements).get(policy_id).cloned().unwrap_or_default()
    }

    pub fn append_certificate(&self, policy_id: &str, certificate: Certificate) {
        lock(&self.certificates).entry(policy_id.to_owned()).or_default().push(certificate);
    }

    pub fn certificates(&self, policy_id: &str) -> Vec<Certificate> {
        lock(&self.certificates).get(policy_id).cloned().unwrap_or_default()
    }
}
