//! Storage backends and the process-wide handle the models delegate to.
//!
//! `HBNB_TYPE_STORAGE=db` selects the relational backend, anything else the
//! JSON-file backend. The handle is created lazily on first use.

mod db;
mod file;

pub use db::DbStorage;
pub use file::FileStorage;

use std::env;

use lazy_static::lazy_static;
use tokio::sync::OnceCell;

use crate::{base::BaseModel, Connection, Database, Error};

/// Process-wide settings, read once from the environment.
pub struct Settings {
    pub storage_type: Option<String>,
    pub database_url: Option<String>,
    pub file_path: String,
}

impl Settings {
    fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            storage_type: env::var("HBNB_TYPE_STORAGE").ok(),
            database_url: env::var("DATABASE_URL").ok(),
            file_path: env::var("HBNB_FILE_PATH").unwrap_or_else(|_| "file.json".to_string()),
        }
    }
}

lazy_static! {
    pub static ref SETTINGS: Settings = Settings::from_env();
}

static STORAGE: OnceCell<Storage> = OnceCell::const_new();

/// The process-wide storage handle, initialized from the environment on
/// first use.
pub async fn storage() -> Result<&'static Storage, Error> {
    STORAGE.get_or_try_init(Storage::from_env).await
}

pub enum Storage {
    Db(DbStorage),
    File(FileStorage),
}

impl Storage {
    pub async fn from_env() -> Result<Self, Error> {
        match SETTINGS.storage_type.as_deref() {
            Some("db") => {
                let url = SETTINGS
                    .database_url
                    .as_deref()
                    .ok_or("DATABASE_URL is not set")?;
                Self::database(Database::new(url).await?).await
            }
            _ => Self::file(&SETTINGS.file_path).await,
        }
    }

    /// Database-backed storage; runs the registered migrations.
    pub async fn database(database: Database) -> Result<Self, Error> {
        let store = Self::Db(DbStorage::new(database));
        store.reload().await?;
        Ok(store)
    }

    /// File-backed storage; loads previously serialized objects, if any.
    pub async fn file(path: &str) -> Result<Self, Error> {
        let store = Self::File(FileStorage::new(path));
        store.reload().await?;
        Ok(store)
    }

    /// Registers an object with the backend.
    pub async fn add<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        match self {
            Self::Db(store) => store.add(obj).await,
            Self::File(store) => store.add(obj).await,
        }
    }

    /// Commits registered objects.
    pub async fn save(&self) -> Result<(), Error> {
        match self {
            Self::Db(store) => store.save().await,
            Self::File(store) => store.save().await,
        }
    }

    pub async fn delete<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        match self {
            Self::Db(store) => store.delete(obj).await,
            Self::File(store) => store.delete(obj).await,
        }
    }

    pub async fn all<M: BaseModel>(&self) -> Result<Vec<M>, Error> {
        match self {
            Self::Db(store) => store.all().await,
            Self::File(store) => store.all().await,
        }
    }

    pub async fn get<M: BaseModel>(&self, id: &str) -> Result<Option<M>, Error> {
        match self {
            Self::Db(store) => store.get(id).await,
            Self::File(store) => store.get(id).await,
        }
    }

    pub async fn count<M: BaseModel>(&self) -> Result<i64, Error> {
        match self {
            Self::Db(store) => store.count::<M>().await,
            Self::File(store) => store.count::<M>().await,
        }
    }

    /// Re-synchronizes the backend: migrations for the database, a fresh
    /// deserialization for the file.
    pub async fn reload(&self) -> Result<(), Error> {
        match self {
            Self::Db(store) => store.reload().await,
            Self::File(store) => store.reload().await,
        }
    }

    /// The underlying connection, when database-backed.
    pub fn conn(&self) -> Option<&Connection> {
        match self {
            Self::Db(store) => Some(store.conn()),
            Self::File(_) => None,
        }
    }
}
