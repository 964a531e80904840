pub use crate::{
    base::BaseModel,
    db::model::Model,
    models::{Amenity, Place},
    storage::{storage, DbStorage, FileStorage, Storage, SETTINGS},
    types::*,
    Connection, Database, Error, MigrationRegistrar, PLACEHOLDER,
};
pub use async_trait::async_trait;
pub use hbnb_models_derive::Model;
pub use sqlx::FromRow;
