//! In-memory stores for tests and embedding.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ObjectStore, Sentence, SentenceStore};
use crate::dispatcher::ObjectBinding;
use crate::error::StoreResult;
use crate::value::Value;

/// FIFO sentence queue held in memory.
#[derive(Default)]
pub struct MemorySentenceStore {
    inner: Mutex<Queue>,
}

#[derive(Default)]
struct Queue {
    next_id: i64,
    pending: VecDeque<Sentence>,
}

impl MemorySentenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sentences<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::new();
        for text in texts {
            store.push(text);
        }
        store
    }

    /// Append a sentence, returning its id.
    pub fn push(&self, text: impl Into<String>) -> i64 {
        let mut queue = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        queue.next_id += 1;
        let id = queue.next_id;
        queue.pending.push_back(Sentence {
            id,
            text: text.into(),
        });
        id
    }

    pub fn remaining(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending
            .len()
    }
}

#[async_trait]
impl SentenceStore for MemorySentenceStore {
    async fn next_unprocessed(&self) -> StoreResult<Option<Sentence>> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pending
            .pop_front())
    }
}

/// Named value store held in memory.
#[derive(Default)]
pub struct MemoryObjectStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: impl Into<String>, value: Value) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), value);
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn snapshot(&self) -> StoreResult<ObjectBinding> {
        Ok(ObjectBinding::new(
            self.values
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone(),
        ))
    }
}
