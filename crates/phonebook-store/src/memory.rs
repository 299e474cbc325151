// SPDX-License-Identifier: Apache-2.0

use crate::{PersonStore, StoreError};
use async_trait::async_trait;
use phonebook_model::{Person, PersonDraft, PersonId};
use tokio::sync::Mutex;

struct MemoryInner {
    persons: Vec<Person>,
    last_id: u64,
}

/// In-memory store: a `Vec` of persons plus a counter seeded from the
/// highest existing id, so assigned ids keep increasing across deletes.
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(Vec::new())
    }

    #[must_use]
    pub fn with_seed(persons: Vec<Person>) -> Self {
        let last_id = persons
            .iter()
            .filter_map(|p| p.id.as_u64())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(MemoryInner { persons, last_id }),
        }
    }

    /// The five demo entries the first backend iteration shipped with.
    /// Some predate the current number format and stay readable as-is.
    #[must_use]
    pub fn demo() -> Self {
        let seed = [
            ("Arto Hellas", "040-123456"),
            ("Ada Lovelace", "39-44-5323523"),
            ("Dan Abramov", "12-43-234345"),
            ("Mary Poppendieck", "39-23-6423122"),
            ("Mikko Kirkanen", "044 2708 279"),
        ];
        Self::with_seed(
            seed.iter()
                .enumerate()
                .map(|(i, (name, number))| Person {
                    id: PersonId::from_u64(i as u64 + 1),
                    name: (*name).to_string(),
                    number: (*number).to_string(),
                })
                .collect(),
        )
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Person>, StoreError> {
        Ok(self.inner.lock().await.persons.clone())
    }

    async fn get(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.persons.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.persons.iter().find(|p| p.name == name).cloned())
    }

    async fn insert(&self, draft: PersonDraft) -> Result<Person, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.persons.iter().any(|p| p.name == draft.name.as_str()) {
            return Err(StoreError::DuplicateName(draft.name.as_str().to_string()));
        }
        inner.last_id += 1;
        let person = draft.into_person(PersonId::from_u64(inner.last_id));
        inner.persons.push(person.clone());
        Ok(person)
    }

    async fn update(
        &self,
        id: &PersonId,
        draft: PersonDraft,
    ) -> Result<Option<Person>, StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.persons.iter().any(|p| &p.id == id) {
            return Ok(None);
        }
        if inner
            .persons
            .iter()
            .any(|p| &p.id != id && p.name == draft.name.as_str())
        {
            return Err(StoreError::DuplicateName(draft.name.as_str().to_string()));
        }
        let Some(slot) = inner.persons.iter_mut().find(|p| &p.id == id) else {
            return Ok(None);
        };
        *slot = draft.into_person(id.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &PersonId) -> Result<Option<Person>, StoreError> {
        let mut inner = self.inner.lock().await;
        let Some(index) = inner.persons.iter().position(|p| &p.id == id) else {
            return Ok(None);
        };
        Ok(Some(inner.persons.remove(index)))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.lock().await.persons.len() as u64)
    }
}
