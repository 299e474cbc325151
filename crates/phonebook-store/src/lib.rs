// SPDX-License-Identifier: Apache-2.0

//! Persistence for the phonebook.
//!
//! [`PersonStore`] is the single seam between the HTTP layer and storage.
//! [`SqliteStore`] is the durable backend; [`MemoryStore`] keeps everything
//! in a `Vec` and exists for tests and throwaway deployments.

#![forbid(unsafe_code)]

use async_trait::async_trait;
use phonebook_model::{Person, PersonDraft, PersonId};
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const CRATE_NAME: &str = "phonebook-store";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// The `name` column is unique; the offending name is carried along.
    DuplicateName(String),
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "{name} is already in the phonebook"),
            Self::Backend(reason) => write!(f, "store backend error: {reason}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[async_trait]
pub trait PersonStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn list(&self) -> Result<Vec<Person>, StoreError>;

    async fn get(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;

    /// Exact, case-sensitive lookup on the stored (trimmed) name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Person>, StoreError>;

    async fn insert(&self, draft: PersonDraft) -> Result<Person, StoreError>;

    /// Replaces name and number of an existing entry. `None` when the id
    /// is unknown.
    async fn update(&self, id: &PersonId, draft: PersonDraft)
        -> Result<Option<Person>, StoreError>;

    /// Removes an entry, returning it. `None` when the id is unknown.
    async fn delete(&self, id: &PersonId) -> Result<Option<Person>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}
