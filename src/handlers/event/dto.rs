use serde::{Deserialize, Deserializer, Serialize};

/// Response model for event API endpoints
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: u64,
    pub ends_at: Option<u64>,
    pub image: Option<String>,
    pub published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: u64,
    pub ends_at: Option<u64>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<u64>,
    /// Absent leaves the end unchanged; `null` clears it
    #[serde(default, deserialize_with = "explicit_null")]
    pub ends_at: Option<Option<u64>>,
    pub image: Option<String>,
    pub published: Option<bool>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<u64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u64>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Default)]
pub struct EventListQuery {
    #[serde(default)]
    pub upcoming: bool,
}
