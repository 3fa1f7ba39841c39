//! Storage layer for locks, users, and access requests.
//!
//! [`Database`] bundles one [`store::KeyedStore`] per entity kind with the
//! clock every repository reads. Repositories in [`repositories`] hold the
//! access logic; they never assume a particular store backend.

use std::sync::Arc;

use latchkey_core::clock::Clock;
use latchkey_core::types::{LockId, PublicKey, RequestId, Timestamp};

pub mod bootstrap;
pub mod models;
pub mod repositories;
pub mod store;

use models::access_request::AccessRequest;
use models::lock::Lock;
use models::user::User;
use store::{KeyedStore, MemoryStore};

/// Handle to all entity stores. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pub locks: Arc<dyn KeyedStore<LockId, Lock>>,
    pub users: Arc<dyn KeyedStore<PublicKey, User>>,
    pub requests: Arc<dyn KeyedStore<RequestId, AccessRequest>>,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Assemble a database from explicit store backends.
    pub fn new(
        locks: Arc<dyn KeyedStore<LockId, Lock>>,
        users: Arc<dyn KeyedStore<PublicKey, User>>,
        requests: Arc<dyn KeyedStore<RequestId, AccessRequest>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            locks,
            users,
            requests,
            clock,
        }
    }

    /// A database held entirely in process memory.
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryStore::new()),
            clock,
        )
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}
