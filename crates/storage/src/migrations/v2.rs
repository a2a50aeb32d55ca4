//! Migration v2: species lookup index for first-discovery checks

pub(super) const SQL: &str = "
CREATE INDEX IF NOT EXISTS idx_history_cloud_name ON history(cloud_name);
";
