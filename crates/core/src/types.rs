/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Untyped JSON object as received from callers or the platform.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
