//! The base-model mixin: identity, timestamps, dict-merge construction, dict
//! serialization, and persistence through the process-wide storage handle.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use sqlx::any::AnyRow;

use crate::{db::model::Model, storage, utils, Error};

/// Contract shared by every hbnb entity.
///
/// The accessors are generated by the `Model` derive macro; everything else
/// is provided here. `save` and `delete` resolve the storage handle at call
/// time, so the backend is whatever the environment selected when the
/// process first touched storage.
#[async_trait::async_trait]
pub trait BaseModel:
    Model
    + Serialize
    + DeserializeOwned
    + Default
    + Clone
    + std::fmt::Display
    + Unpin
    + Send
    + Sync
    + for<'r> sqlx::FromRow<'r, AnyRow>
    + 'static
{
    fn id(&self) -> &str;

    fn created_at(&self) -> &str;

    fn updated_at(&self) -> &str;

    fn set_updated_at(&mut self, stamp: String);

    /// A fresh instance: new uuid, both timestamps set to now.
    fn new() -> Self {
        Self::default()
    }

    /// Refreshes `updated_at`.
    fn touch(&mut self) {
        self.set_updated_at(utils::timestamp());
    }

    /// Restores an instance from a field mapping.
    ///
    /// Provided keys overlay the defaults, so a mapping without `id` or the
    /// timestamps yields fresh values for them. A `__class__` key is
    /// ignored, as are keys naming no column.
    fn from_map(mut map: Map<String, Value>) -> Result<Self, Error> {
        map.remove("__class__");
        let Value::Object(mut attrs) = serde_json::to_value(Self::default())? else {
            return Err("model did not serialize to an object".into());
        };
        for (key, value) in map {
            attrs.insert(key, value);
        }
        Ok(serde_json::from_value(Value::Object(attrs))?)
    }

    /// The fields of the instance plus a `__class__` marker.
    fn to_map(&self) -> Result<Map<String, Value>, Error> {
        let Value::Object(mut attrs) = serde_json::to_value(self)? else {
            return Err("model did not serialize to an object".into());
        };
        attrs.insert(
            "__class__".to_string(),
            Value::String(Self::CLASS.to_string()),
        );
        Ok(attrs)
    }

    /// Timestamps the instance and hands it to the storage handle.
    async fn save(&mut self) -> Result<(), Error> {
        self.touch();
        let store = storage::storage().await?;
        store.add(&*self).await?;
        store.save().await
    }

    /// Removes the instance from the storage handle.
    async fn delete(&self) -> Result<(), Error> {
        storage::storage().await?.delete(self).await
    }
}
