/// Discord snowflakes (users, messages, roles) are carried as strings.
pub type SnowflakeId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
