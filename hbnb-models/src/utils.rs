use chrono::Utc;

/// Timestamp layout shared by the columns and their serialized form.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

pub fn timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}
