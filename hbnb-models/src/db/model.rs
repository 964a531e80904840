//! The mapping contract between an entity struct and its table.

use sqlx::{any::AnyRow, Row};

use crate::{Connection, Error, FutRes};

/// Trait for table-backed models.
///
/// The constants and the row operations (`insert`, `update`, `remove`) are
/// generated by the `Model` derive macro; the remaining operations are
/// provided on top of them.
#[async_trait::async_trait]
pub trait Model {
    /// The class name, as written into serialized maps.
    const CLASS: &'static str;
    /// The table name.
    const NAME: &'static str;
    /// The primary key column.
    const PK: &'static str;
    /// DDL creating the table.
    const UP: &'static str;
    /// DDL dropping the table.
    const DOWN: &'static str;

    /// Creates the table of the model if it does not exist yet.
    fn migrate(conn: &Connection) -> FutRes<'_, (), Error>
    where
        Self: Sized,
    {
        Box::pin(async move {
            #[cfg(debug_assertions)]
            {
                let formatted_sql = sqlformat::format(
                    Self::UP,
                    &sqlformat::QueryParams::None,
                    &sqlformat::FormatOptions::default(),
                );
                println!("{formatted_sql}");
            }

            sqlx::query(Self::UP).execute(conn).await?;
            Ok(())
        })
    }

    /// Drops and recreates the table.
    fn reset(conn: &Connection) -> FutRes<'_, (), Error>
    where
        Self: Sized,
    {
        Box::pin(async move {
            sqlx::query(Self::DOWN).execute(conn).await?;
            sqlx::query(Self::UP).execute(conn).await?;
            Ok(())
        })
    }

    /// Inserts the instance as a new row.
    async fn insert(&self, conn: &Connection) -> Result<(), Error>
    where
        Self: Sized;

    /// Writes the instance over its existing row, returning the number of
    /// rows affected.
    async fn update(&self, conn: &Connection) -> Result<u64, Error>
    where
        Self: Sized;

    /// Deletes the row of the instance.
    async fn remove(&self, conn: &Connection) -> Result<(), Error>
    where
        Self: Sized;

    /// Retrieves all instances of the model.
    async fn all(conn: &Connection) -> Result<Vec<Self>, Error>
    where
        Self: Sized + Unpin + for<'r> sqlx::FromRow<'r, AnyRow>,
    {
        let query = format!("select * from {name}", name = Self::NAME);
        Ok(sqlx::query_as::<_, Self>(&query).fetch_all(conn).await?)
    }

    /// Retrieves the instance with the given primary key, if any.
    async fn get(id: &str, conn: &Connection) -> Result<Option<Self>, Error>
    where
        Self: Sized + Unpin + for<'r> sqlx::FromRow<'r, AnyRow>,
    {
        let query = format!(
            "select * from {name} where {pk}=?1",
            name = Self::NAME,
            pk = Self::PK,
        )
        .replace('?', crate::db::PLACEHOLDER);
        Ok(sqlx::query_as::<_, Self>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?)
    }

    /// Counts the rows of the model.
    async fn count(conn: &Connection) -> Result<i64, Error>
    where
        Self: Sized,
    {
        let query = format!("select count(*) from {name}", name = Self::NAME);
        Ok(sqlx::query(&query).fetch_one(conn).await?.get(0))
    }
}
