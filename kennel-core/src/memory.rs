use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::dog::{Dog, DogChanges, DogId, NewDog};
use crate::errors::KennelResult;
use crate::store::{DogStore, Lookup};

#[derive(Default)]
struct Table {
    rows: BTreeMap<DogId, Dog>,
    last_id: i64,
}

/// Process-local [`DogStore`].
///
/// Ids auto-increment from 1 and are never reused, like an
/// `AUTOINCREMENT` primary key.
#[derive(Default)]
pub struct MemoryDogStore {
    table: RwLock<Table>,
}

impl MemoryDogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DogStore for MemoryDogStore {
    async fn find_many(&self) -> KennelResult<Vec<Dog>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_unique(&self, id: DogId) -> KennelResult<Lookup<Dog>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned().into())
    }

    async fn create(&self, data: NewDog) -> KennelResult<Dog> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let dog = Dog {
            id: DogId(table.last_id),
            name: data.name,
            breed: data.breed,
            age: data.age,
            description: data.description,
        };
        table.rows.insert(dog.id, dog.clone());

        tracing::debug!(id = %dog.id, "memory store: dog created");
        Ok(dog)
    }

    async fn update(&self, id: DogId, changes: DogChanges) -> KennelResult<Lookup<Dog>> {
        let mut table = self.table.write().await;
        let Some(dog) = table.rows.get_mut(&id) else {
            return Ok(Lookup::NotFound);
        };

        changes.apply_to(dog);
        Ok(Lookup::Found(dog.clone()))
    }

    async fn delete(&self, id: DogId) -> KennelResult<Lookup<Dog>> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).into())
    }
}
