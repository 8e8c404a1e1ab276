//! In-memory user record store.
//!
//! The store owns all user records for the process lifetime: an ordered
//! collection preserving insertion order, an email index for O(1) duplicate
//! checks, and a monotonic id counter. Inserts do their check-then-write
//! under a single lock acquisition, so id uniqueness and the email
//! constraint hold under concurrent calls.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Sample records seeded at startup.
const SAMPLE_USERS: &[(&str, &str)] = &[
    ("John Doe", "john@example.com"),
    ("Jane Smith", "jane@example.com"),
    ("Bob Johnson", "bob@example.com"),
];

/// A single user record. Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creation timestamp formatted for display.
    pub fn created_display(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The email is already present in the store.
    #[error("Email {0} already exists")]
    DuplicateEmail(String),
}

/// In-memory user store with an email uniqueness constraint.
pub struct UserStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<UserRecord>,
    emails: HashSet<String>,
    next_id: i64,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: Vec::new(),
                emails: HashSet::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a store seeded with the sample records.
    pub fn with_sample_users() -> Self {
        let store = Self::new();
        for (name, email) in SAMPLE_USERS {
            // Seed emails are distinct, so these inserts cannot fail.
            let _ = store.insert(name, email);
        }
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Store operations don't panic while holding the lock; if a caller
        // panicked anyway, the data is still consistent, so recover the guard.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a new record, assigning the next id and the current timestamp.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] if the email is already
    /// present; the store is left unchanged in that case.
    pub fn insert(&self, name: &str, email: &str) -> Result<UserRecord, StoreError> {
        let mut inner = self.lock();

        if inner.emails.contains(email) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let record = UserRecord {
            id: inner.next_id,
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };

        inner.next_id += 1;
        inner.emails.insert(record.email.clone());
        inner.users.push(record.clone());

        Ok(record)
    }

    /// Scan records in insertion order, optionally filtered by a
    /// case-sensitive name substring, capped at `limit` results.
    pub fn query(&self, name_filter: Option<&str>, limit: usize) -> Vec<UserRecord> {
        let inner = self.lock();
        inner
            .users
            .iter()
            .filter(|u| name_filter.is_none_or(|f| u.name.contains(f)))
            .take(limit)
            .cloned()
            .collect()
    }

    /// All records in insertion order.
    pub fn all(&self) -> Vec<UserRecord> {
        let inner = self.lock();
        inner.users.clone()
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.lock().users.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
