use crate::{base::BaseModel, db::model::Model, Connection, Database, Error};

/// The relational backend. SQL execution and row mapping are delegated to
/// sqlx; the pool autocommits, so `save` has nothing left to do.
pub struct DbStorage {
    database: Database,
}

impl DbStorage {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub fn conn(&self) -> &Connection {
        &self.database.conn
    }

    /// Writes the object to its table, inserting when no row matched.
    pub async fn add<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        if obj.update(self.conn()).await? == 0 {
            obj.insert(self.conn()).await?;
        }
        Ok(())
    }

    pub async fn save(&self) -> Result<(), Error> {
        Ok(())
    }

    pub async fn delete<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        obj.remove(self.conn()).await
    }

    pub async fn all<M: BaseModel>(&self) -> Result<Vec<M>, Error> {
        M::all(self.conn()).await
    }

    pub async fn get<M: BaseModel>(&self, id: &str) -> Result<Option<M>, Error> {
        M::get(id, self.conn()).await
    }

    pub async fn count<M: BaseModel>(&self) -> Result<i64, Error> {
        M::count(self.conn()).await
    }

    /// Creates the tables of every registered model.
    pub async fn reload(&self) -> Result<(), Error> {
        self.database.migrate().await
    }
}
