use hbnb_models_derive::Model;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{
    db::model::Model,
    models::{amenity::Amenity, PLACE_AMENITY},
    types::{DateTime, Float, Integer},
    Connection, Error, PLACEHOLDER,
};

/// A place to stay.
#[derive(Model, FromRow, Serialize, Deserialize, Clone, Debug)]
#[model(table = "places")]
pub struct Place {
    pub id: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    #[field(size = 60)]
    pub city_id: String,
    #[field(size = 60)]
    pub user_id: String,
    #[field(size = 128)]
    pub name: String,
    #[field(size = 1024)]
    pub description: Option<String>,
    #[field(default = 0)]
    pub number_rooms: Integer,
    #[field(default = 0)]
    pub number_bathrooms: Integer,
    #[field(default = 0)]
    pub max_guest: Integer,
    #[field(default = 0)]
    pub price_by_night: Integer,
    pub latitude: Option<Float>,
    pub longitude: Option<Float>,
}

impl Place {
    /// The amenities offered by this place.
    pub async fn amenities(&self, conn: &Connection) -> Result<Vec<Amenity>, Error> {
        let query = format!(
            "select {amenities}.* from {amenities} inner join {link} on {amenities}.id = {link}.amenity_id where {link}.place_id = ?1",
            amenities = Amenity::NAME,
            link = PLACE_AMENITY,
        )
        .replace('?', PLACEHOLDER);
        Ok(sqlx::query_as::<_, Amenity>(&query)
            .bind(self.id.clone())
            .fetch_all(conn)
            .await?)
    }

    /// Links an amenity to this place.
    pub async fn add_amenity(&self, amenity: &Amenity, conn: &Connection) -> Result<(), Error> {
        let query = format!("insert into {link} (place_id, amenity_id) values (?1, ?2);", link = PLACE_AMENITY)
            .replace('?', PLACEHOLDER);
        sqlx::query(&query)
            .bind(self.id.clone())
            .bind(amenity.id.clone())
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Unlinks an amenity from this place.
    pub async fn remove_amenity(&self, amenity: &Amenity, conn: &Connection) -> Result<(), Error> {
        let query = format!("delete from {link} where place_id = ?1 and amenity_id = ?2;", link = PLACE_AMENITY)
            .replace('?', PLACEHOLDER);
        sqlx::query(&query)
            .bind(self.id.clone())
            .bind(amenity.id.clone())
            .execute(conn)
            .await?;
        Ok(())
    }
}
