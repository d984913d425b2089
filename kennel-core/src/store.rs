use async_trait::async_trait;

use crate::dog::{Dog, DogChanges, DogId, NewDog};
use crate::errors::KennelResult;

/// Outcome of a store call that addresses one record by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Persistence contract for dogs.
///
/// - `find_many`   → every record
/// - `find_unique` → one record by id
/// - `create`      → insert, the store assigns the id
/// - `update`      → partial update by id
/// - `delete`      → remove by id, returning what was removed
///
/// A missing id is reported as [`Lookup::NotFound`], never as an error.
/// `Err` is reserved for the store itself failing.
#[async_trait]
pub trait DogStore: Send + Sync {
    async fn find_many(&self) -> KennelResult<Vec<Dog>>;

    async fn find_unique(&self, id: DogId) -> KennelResult<Lookup<Dog>>;

    async fn create(&self, data: NewDog) -> KennelResult<Dog>;

    async fn update(&self, id: DogId, changes: DogChanges) -> KennelResult<Lookup<Dog>>;

    async fn delete(&self, id: DogId) -> KennelResult<Lookup<Dog>>;
}
