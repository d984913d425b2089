//! kennel-sqlx: a [`DogStore`] over a SQLite `dogs` table.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use kennel_core::errors::KennelResult;
use kennel_core::{Dog, DogChanges, DogId, DogStore, Lookup, NewDog};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const DOG_COLUMNS: &str = "id, name, breed, age, description";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("dog store sql error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("dog store migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

#[derive(sqlx::FromRow)]
struct DogRow {
    id: i64,
    name: String,
    breed: String,
    age: f64,
    description: String,
}

impl From<DogRow> for Dog {
    fn from(row: DogRow) -> Self {
        Dog {
            id: DogId(row.id),
            name: row.name,
            breed: row.breed,
            age: row.age,
            description: row.description,
        }
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[derive(Clone)]
pub struct SqliteDogStore {
    pool: SqlitePool,
}

impl SqliteDogStore {
    /// Open a pool for `url` (e.g. `sqlite://kennel.db?mode=rwc`).
    ///
    /// In-memory databases live and die with their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(8)
                .connect_with(options)
                .await?
        };

        Ok(Self { pool })
    }

    pub async fn connect_and_migrate(url: &str) -> Result<Self, StoreError> {
        let store = Self::connect(url).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Apply pending migrations; already-applied ones are skipped.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DogStore for SqliteDogStore {
    async fn find_many(&self) -> KennelResult<Vec<Dog>> {
        let sql = format!("SELECT {DOG_COLUMNS} FROM dogs ORDER BY id");
        let rows: Vec<DogRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(Dog::from).collect())
    }

    async fn find_unique(&self, id: DogId) -> KennelResult<Lookup<Dog>> {
        let sql = format!("SELECT {DOG_COLUMNS} FROM dogs WHERE id = ?");
        let row: Option<DogRow> = sqlx::query_as(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Dog::from).into())
    }

    async fn create(&self, data: NewDog) -> KennelResult<Dog> {
        let row: DogRow = sqlx::query_as(&format!(
            "INSERT INTO dogs (name, breed, age, description) \
             VALUES (?, ?, ?, ?) RETURNING {DOG_COLUMNS}"
        ))
        .bind(data.name)
        .bind(data.breed)
        .bind(data.age)
        .bind(data.description)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "sqlite store: dog created");
        Ok(row.into())
    }

    async fn update(&self, id: DogId, changes: DogChanges) -> KennelResult<Lookup<Dog>> {
        let row: Option<DogRow> = sqlx::query_as(&format!(
            "UPDATE dogs SET \
                name = COALESCE(?, name), \
                breed = COALESCE(?, breed), \
                age = COALESCE(?, age), \
                description = COALESCE(?, description) \
             WHERE id = ? RETURNING {DOG_COLUMNS}"
        ))
        .bind(changes.name)
        .bind(changes.breed)
        .bind(changes.age)
        .bind(changes.description)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Dog::from).into())
    }

    async fn delete(&self, id: DogId) -> KennelResult<Lookup<Dog>> {
        let sql = format!("DELETE FROM dogs WHERE id = ? RETURNING {DOG_COLUMNS}");
        let row: Option<DogRow> = sqlx::query_as(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Dog::from).into())
    }
}
