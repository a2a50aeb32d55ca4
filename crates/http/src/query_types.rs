use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    /// Stamp date as `YYYY-MM-DD`; today when absent.
    pub date: Option<String>,
}
