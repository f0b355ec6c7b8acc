use serde::{Deserialize, Serialize};

use super::utils::now_ts;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Customer testimonial model for MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Testimonial {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub author: String,
    #[serde(default)]
    pub location: Option<String>,
    pub rating: u8,
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    pub published: bool,
    pub created_at: u64,
    pub updated_at: u64,
}

impl Testimonial {
    pub fn new(author: String, rating: u8, body: String) -> Self {
        Self {
            id: None,
            author,
            location: None,
            rating,
            body,
            image: None,
            published: false,
            created_at: now_ts(),
            updated_at: now_ts(),
        }
    }
}

pub fn is_valid_rating(rating: u8) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}
