use hbnb_models::prelude::*;
use serde_json::json;

async fn setup_database(name: &str) -> Database {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    Database::new(&url).await.expect("failed to init database")
}

#[test]
fn fresh_instance_has_identity() {
    let amenity = Amenity::new();

    assert!(uuid::Uuid::parse_str(&amenity.id).is_ok());
    assert!(!amenity.created_at.is_empty());
    assert!(!amenity.updated_at.is_empty());
    assert_eq!(amenity.name, "");

    let other = Amenity::new();
    assert_ne!(amenity.id, other.id);
}

#[test]
fn from_map_fills_missing_fields() {
    let map = json!({ "name": "Wifi", "__class__": "Amenity" });
    let amenity = Amenity::from_map(map.as_object().cloned().unwrap()).unwrap();

    assert_eq!(amenity.name, "Wifi");
    assert!(uuid::Uuid::parse_str(&amenity.id).is_ok());
    assert!(!amenity.created_at.is_empty());
}

#[test]
fn from_map_keeps_given_fields() {
    let map = json!({
        "id": "0c2d1a1b-6a5c-4e7a-9e9f-000000000000",
        "created_at": "2017-09-28T21:03:54.052298",
        "updated_at": "2017-09-28T21:03:54.052302",
        "name": "Pool",
    });
    let amenity = Amenity::from_map(map.as_object().cloned().unwrap()).unwrap();

    assert_eq!(amenity.id, "0c2d1a1b-6a5c-4e7a-9e9f-000000000000");
    assert_eq!(amenity.created_at, "2017-09-28T21:03:54.052298");
    assert_eq!(amenity.updated_at, "2017-09-28T21:03:54.052302");
    assert_eq!(amenity.name, "Pool");
}

#[test]
fn to_map_carries_the_class_marker() {
    let mut amenity = Amenity::new();
    amenity.name = "Wifi".to_string();

    let map = amenity.to_map().unwrap();
    assert_eq!(map["__class__"], "Amenity");
    assert_eq!(map["name"], "Wifi");
    assert_eq!(map["id"], json!(amenity.id));

    let restored = Amenity::from_map(map).unwrap();
    assert_eq!(restored.id, amenity.id);
    assert_eq!(restored.name, amenity.name);
}

#[test]
fn display_shows_class_and_id() {
    let mut amenity = Amenity::new();
    amenity.name = "Sauna".to_string();

    let rendered = amenity.to_string();
    assert!(rendered.starts_with(&format!("[Amenity] ({})", amenity.id)));
    assert!(rendered.contains("Sauna"));
}

#[test]
fn touch_refreshes_updated_at() {
    let mut place = Place::new();
    let before = place.updated_at.clone();
    place.touch();
    assert!(place.updated_at >= before);
    assert!(place.updated_at >= place.created_at);
}

#[tokio::test]
async fn model_crud_round_trip() {
    let database = setup_database("model_crud").await;
    database.migrate().await.expect("migration failed");
    Amenity::reset(&database.conn).await.unwrap();

    let mut amenity = Amenity::new();
    amenity.name = "Wifi".to_string();
    amenity.insert(&database.conn).await.unwrap();

    let fetched = Amenity::get(&amenity.id, &database.conn)
        .await
        .unwrap()
        .expect("amenity should exist");
    assert_eq!(fetched.name, "Wifi");

    amenity.name = "Fast Wifi".to_string();
    let affected = amenity.update(&database.conn).await.unwrap();
    assert_eq!(affected, 1);

    let all = Amenity::all(&database.conn).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Fast Wifi");
    assert_eq!(Amenity::count(&database.conn).await.unwrap(), 1);

    amenity.remove(&database.conn).await.unwrap();
    assert!(Amenity::get(&amenity.id, &database.conn)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn database_storage_crud() {
    let database = setup_database("storage_crud").await;
    let store = Storage::database(database).await.expect("storage init");

    let mut amenity = Amenity::new();
    amenity.name = "Wifi".to_string();
    store.add(&amenity).await.unwrap();
    store.save().await.unwrap();

    let fetched: Amenity = store.get(&amenity.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Wifi");

    // A second add with the same id must overwrite, not duplicate.
    amenity.name = "Cable".to_string();
    amenity.touch();
    store.add(&amenity).await.unwrap();
    assert_eq!(store.count::<Amenity>().await.unwrap(), 1);
    let fetched: Amenity = store.get(&amenity.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Cable");

    store.delete(&amenity).await.unwrap();
    assert!(store.get::<Amenity>(&amenity.id).await.unwrap().is_none());
}

#[tokio::test]
async fn place_amenity_association() {
    let database = setup_database("association").await;
    database.migrate().await.expect("migration failed");
    let conn = &database.conn;

    let mut place = Place::new();
    place.name = "Loft".to_string();
    place.city_id = "c1".to_string();
    place.user_id = "u1".to_string();
    place.insert(conn).await.unwrap();

    let mut wifi = Amenity::new();
    wifi.name = "Wifi".to_string();
    wifi.insert(conn).await.unwrap();

    let mut pool = Amenity::new();
    pool.name = "Pool".to_string();
    pool.insert(conn).await.unwrap();

    place.add_amenity(&wifi, conn).await.unwrap();
    place.add_amenity(&pool, conn).await.unwrap();

    let mut names: Vec<_> = place
        .amenities(conn)
        .await
        .unwrap()
        .into_iter()
        .map(|amenity| amenity.name)
        .collect();
    names.sort();
    assert_eq!(names, ["Pool", "Wifi"]);

    let places = wifi.places(conn).await.unwrap();
    assert_eq!(places.len(), 1);
    assert_eq!(places[0].id, place.id);

    place.remove_amenity(&pool, conn).await.unwrap();
    let amenities = place.amenities(conn).await.unwrap();
    assert_eq!(amenities.len(), 1);
    assert_eq!(amenities[0].name, "Wifi");
}

#[tokio::test]
async fn file_storage_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.json");
    let path = path.to_str().unwrap();

    let store = Storage::file(path).await.expect("storage init");

    let mut amenity = Amenity::new();
    amenity.name = "Wifi".to_string();
    store.add(&amenity).await.unwrap();

    let mut place = Place::new();
    place.name = "Loft".to_string();
    place.city_id = "c1".to_string();
    place.user_id = "u1".to_string();
    store.add(&place).await.unwrap();

    store.save().await.unwrap();

    // The file holds a map keyed `Class.id`, each value carrying __class__.
    let raw = std::fs::read_to_string(path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &parsed[format!("Amenity.{}", amenity.id)];
    assert_eq!(entry["__class__"], "Amenity");
    assert_eq!(entry["name"], "Wifi");

    // A second handle over the same file sees the saved objects.
    let reopened = Storage::file(path).await.expect("storage reload");
    assert_eq!(reopened.count::<Amenity>().await.unwrap(), 1);
    assert_eq!(reopened.count::<Place>().await.unwrap(), 1);
    let fetched: Amenity = reopened.get(&amenity.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Wifi");

    store.delete(&amenity).await.unwrap();
    assert_eq!(store.count::<Amenity>().await.unwrap(), 0);
}

// The only test allowed to touch the process-wide handle: `save`/`delete`
// resolve it at call time, and the environment pins it to a temp file.
#[tokio::test]
async fn save_and_delete_go_through_the_global_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.json");
    std::env::remove_var("HBNB_TYPE_STORAGE");
    std::env::set_var("HBNB_FILE_PATH", path.to_str().unwrap());

    let mut amenity = Amenity::new();
    amenity.name = "Wifi".to_string();
    let created = amenity.created_at.clone();
    amenity.save().await.expect("save through storage");
    assert!(amenity.updated_at >= created);

    let store = storage().await.unwrap();
    let fetched: Amenity = store.get(&amenity.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Wifi");
    assert!(path.exists());

    amenity.delete().await.expect("delete through storage");
    assert!(store.get::<Amenity>(&amenity.id).await.unwrap().is_none());
}
