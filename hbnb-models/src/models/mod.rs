//! The table-backed entities and the association table joining them.

pub mod amenity;
pub mod place;

pub use amenity::Amenity;
pub use place::Place;

use crate::{Connection, Error, FutRes, MigrationRegistrar};

/// Association table for the places/amenities many-to-many relationship.
///
/// No `references` clauses: the migration registry is unordered, so the
/// entity tables may not exist yet when this one is created.
pub(crate) const PLACE_AMENITY: &str = "place_amenity";

const PLACE_AMENITY_UP: &str = "create table if not exists place_amenity (place_id varchar(60) not null, amenity_id varchar(60) not null, primary key (place_id, amenity_id));";

fn migrate_place_amenity(conn: &Connection) -> FutRes<'_, (), Error> {
    Box::pin(async move {
        sqlx::query(PLACE_AMENITY_UP).execute(conn).await?;
        Ok(())
    })
}

inventory::submit! {
    MigrationRegistrar {
        migrate_fn: migrate_place_amenity
    }
}
