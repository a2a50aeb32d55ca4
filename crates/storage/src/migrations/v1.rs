//! Migration v1: sighting history

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cloud_name TEXT,
    tier TEXT,
    score INTEGER,
    science_fact TEXT,
    weather_tip TEXT,
    image_data BLOB,
    image_hash TEXT UNIQUE,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
);
";
