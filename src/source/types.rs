use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct SourceRow {
    pub source_id: i32,
    pub url: String,
    pub name: Option<String>,
    pub state: Option<String>,
    pub is_active: bool,
    pub added_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SourceAddPlan {
    pub action: &'static str,
    pub url: String,
    pub name: Option<String>,
    pub state: Option<String>,
    pub active: bool,
}

#[derive(Serialize)]
pub struct SourceAddResult {
    pub inserted: bool,
    pub url: String,
}

#[derive(Serialize)]
pub struct SourceList {
    pub sources: Vec<SourceRow>,
}
