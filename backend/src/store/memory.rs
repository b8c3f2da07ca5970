use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::{NewNote, NoteStore, StoreError};

/// Ordered id -> entity map with its own id counter.
///
/// Ids come from a counter that only moves forward, so an id freed by a
/// deletion is never handed out again. Iteration follows id order, which is
/// also insertion order.
#[derive(Debug)]
pub(crate) struct IdMap<T> {
    next_id: u64,
    items: BTreeMap<u64, T>,
}

impl<T: Clone> IdMap<T> {
    pub(crate) fn with_seed(seed: impl IntoIterator<Item = (u64, T)>) -> Self {
        let items: BTreeMap<u64, T> = seed.into_iter().collect();
        let next_id = items.keys().next_back().map_or(1, |max| max + 1);
        Self { next_id, items }
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&T> {
        key_of(id).and_then(|key| self.items.get(&key))
    }

    /// Assigns the next id and stores whatever `build` makes of it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(String) -> T) -> T {
        let key = self.next_id;
        self.next_id += 1;
        let item = build(key.to_string());
        self.items.insert(key, item.clone());
        item
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<T> {
        key_of(id).and_then(|key| self.items.remove(&key))
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

// Only the canonical spelling of an id matches: "01" and "+1" are not "1".
fn key_of(id: &str) -> Option<u64> {
    id.parse::<u64>().ok().filter(|key| key.to_string() == id)
}

pub struct MemoryNoteStore {
    notes: RwLock<IdMap<common::Note>>,
}

impl MemoryNoteStore {
    pub fn new(seed: Vec<common::Note>) -> Self {
        let seed = seed
            .into_iter()
            .filter_map(|note| note.id.parse::<u64>().ok().map(|key| (key, note)));
        Self {
            notes: RwLock::new(IdMap::with_seed(seed)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            common::Note {
                id: "1".to_owned(),
                content: "HTML is easy".to_owned(),
                important: true,
            },
            common::Note {
                id: "2".to_owned(),
                content: "Browser can execute only JavaScript".to_owned(),
                important: false,
            },
            common::Note {
                id: "3".to_owned(),
                content: "GET and POST are the most important methods of HTTP protocol".to_owned(),
                important: true,
            },
        ])
    }
}

#[async_trait::async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self) -> Result<Vec<common::Note>, StoreError> {
        Ok(self.notes.read().await.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<common::Note>, StoreError> {
        Ok(self.notes.read().await.get(id).cloned())
    }

    async fn create(&self, note: NewNote) -> Result<common::Note, StoreError> {
        let mut notes = self.notes.write().await;
        Ok(notes.insert_with(|id| common::Note {
            id,
            content: note.content,
            important: note.important,
        }))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.notes.write().await.remove(id);
        Ok(())
    }
}
