//! # Database State
//!
//! Wraps the `Database` handle. The pool is thread-safe, so no lock.

use storefront_store::{Database, SqliteStore};

#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }

    /// A key-value handle sharing the pool.
    pub fn kv(&self) -> SqliteStore {
        self.db.kv()
    }
}
