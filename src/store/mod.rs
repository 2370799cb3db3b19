//! Collaborator contracts: the sentence queue and the named object store.
//!
//! The engine consumes these two narrow contracts and nothing else about
//! their storage. The SQLite implementations persist both in one database;
//! the in-memory implementations back the driver tests.

use async_trait::async_trait;

use crate::dispatcher::ObjectBinding;
use crate::error::StoreResult;

pub mod memory;
pub mod sqlite;

pub use memory::{MemoryObjectStore, MemorySentenceStore};
pub use sqlite::{SqliteObjectStore, SqliteSentenceStore};

/// One queued sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub id: i64,
    pub text: String,
}

/// Queue of pending sentences.
///
/// Fetching marks the sentence processed in the same atomic step, so an id
/// is handed out at most once even with several drivers on one queue.
#[async_trait]
pub trait SentenceStore: Send + Sync {
    async fn next_unprocessed(&self) -> StoreResult<Option<Sentence>>;
}

/// Named value store. `snapshot` decodes every persisted literal through
/// the restricted parser and returns a read-only binding for one dispatch.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn snapshot(&self) -> StoreResult<ObjectBinding>;
}
