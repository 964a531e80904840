use std::{collections::HashMap, path::PathBuf};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{base::BaseModel, db::model::Model, Error};

/// The JSON-file backend. Objects live in memory keyed by `Class.id` and are
/// flushed to disk on `save`.
pub struct FileStorage {
    path: PathBuf,
    objects: RwLock<HashMap<String, Value>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    fn key<M: BaseModel>(id: &str) -> String {
        format!("{class}.{id}", class = M::CLASS)
    }

    pub async fn add<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        let map = obj.to_map()?;
        self.objects
            .write()
            .await
            .insert(Self::key::<M>(obj.id()), Value::Object(map));
        Ok(())
    }

    /// Serializes the object map to the storage file.
    pub async fn save(&self) -> Result<(), Error> {
        let objects = self.objects.read().await;
        let payload = serde_json::to_string(&*objects)?;
        tokio::fs::write(&self.path, payload).await?;
        Ok(())
    }

    pub async fn delete<M: BaseModel>(&self, obj: &M) -> Result<(), Error> {
        self.objects
            .write()
            .await
            .remove(&Self::key::<M>(obj.id()));
        Ok(())
    }

    pub async fn all<M: BaseModel>(&self) -> Result<Vec<M>, Error> {
        let objects = self.objects.read().await;
        let prefix = format!("{class}.", class = M::CLASS);
        let mut result = Vec::new();
        for (key, value) in objects.iter() {
            if key.starts_with(&prefix) {
                if let Some(map) = value.as_object() {
                    result.push(M::from_map(map.clone())?);
                }
            }
        }
        Ok(result)
    }

    pub async fn get<M: BaseModel>(&self, id: &str) -> Result<Option<M>, Error> {
        let objects = self.objects.read().await;
        match objects.get(&Self::key::<M>(id)).and_then(Value::as_object) {
            Some(map) => Ok(Some(M::from_map(map.clone())?)),
            None => Ok(None),
        }
    }

    pub async fn count<M: BaseModel>(&self) -> Result<i64, Error> {
        let objects = self.objects.read().await;
        let prefix = format!("{class}.", class = M::CLASS);
        Ok(objects.keys().filter(|key| key.starts_with(&prefix)).count() as i64)
    }

    /// Deserializes the storage file, keeping the map empty when the file
    /// does not exist yet.
    pub async fn reload(&self) -> Result<(), Error> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let parsed: HashMap<String, Value> = serde_json::from_str(&raw)?;
                *self.objects.write().await = parsed;
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
