use serde::{Deserialize, Serialize};

use super::utils::now_ts;

/// Showroom events, trunk shows and the like
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Event {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub starts_at: u64,
    #[serde(default)]
    pub ends_at: Option<u64>,
    #[serde(default)]
    pub image: Option<String>,
    pub published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Event {
    pub fn new(title: String, starts_at: u64) -> Self {
        Self {
            id: None,
            title,
            description: None,
            location: None,
            starts_at,
            ends_at: None,
            image: None,
            published: true,
            created_at: now_ts(),
            updated_at: now_ts(),
        }
    }
}
