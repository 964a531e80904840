use hbnb_models_derive::Model;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    db::model::Model,
    models::{place::Place, PLACE_AMENITY},
    types::DateTime,
    Connection, Error, PLACEHOLDER,
};

/// Something a place offers, e.g. "Wifi".
#[derive(Model, FromRow, Serialize, Deserialize, Clone, Debug)]
#[model(table = "amenities")]
pub struct Amenity {
    pub id: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[field(size = 128)]
    pub name: String,
}

impl Amenity {
    /// The places offering this amenity.
    pub async fn places(&self, conn: &Connection) -> Result<Vec<Place>, Error> {
        let query = format!(
            "select {places}.* from {places} inner join {link} on {places}.id = {link}.place_id where {link}.amenity_id = ?1",
            places = Place::NAME,
            link = PLACE_AMENITY,
        )
        .replace('?', PLACEHOLDER);
        Ok(sqlx::query_as::<_, Place>(&query)
            .bind(self.id.clone())
            .fetch_all(conn)
            .await?)
    }
}
