//! Persistence-layer data models for the hbnb clone.
//!
//! The crate provides the base-model contract (identity, timestamps, dict
//! serialization, delegation to a process-wide storage handle) and the
//! table-backed entities built on it. Row mapping and SQL execution are
//! delegated to sqlx.

// Lets the derive macro output name this crate the same way inside and
// outside of it.
extern crate self as hbnb_models;

/// The base-model mixin shared by every entity.
pub mod base;

/// Database plumbing shared by the models and the storage backends.
pub mod db;

/// The table-backed entities.
pub mod models;

/// This module contains the prelude for the crate.
pub mod prelude;

/// Storage backends and the process-wide storage handle.
pub mod storage;

/// Column type aliases used in model declarations.
pub mod types;

mod utils;

pub use db::PLACEHOLDER;
pub use utils::*;

// Re-exported for the derive macro output.
pub use async_trait;
pub use inventory;
pub use serde_json;
pub use sqlx;

use std::{future::Future, pin::Pin};

pub type Connection = sqlx::Pool<sqlx::Any>;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

type FutRes<'fut, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'fut>>;

type MigrateFn = for<'m> fn(&'m Connection) -> FutRes<'m, (), Error>;

pub struct MigrationRegistrar {
    pub migrate_fn: MigrateFn,
}

inventory::collect!(MigrationRegistrar);

/// Represents a database.
pub struct Database {
    pub conn: Connection,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self, Error> {
        sqlx::any::install_default_drivers();
        let conn = sqlx::any::AnyPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self { conn })
    }

    /// Creates the table of every registered model.
    pub async fn migrate(&self) -> Result<(), Error> {
        for model in inventory::iter::<MigrationRegistrar> {
            (model.migrate_fn)(&self.conn).await?;
        }
        Ok(())
    }
}
