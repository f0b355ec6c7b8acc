use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Upper bound on saved items per guest
pub const MAX_WISHLIST_ITEMS: usize = 100;

/// Wishlist model for MongoDB, one per guest
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Wishlist {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub guest_id: String,
    #[serde(default)]
    pub product_ids: Vec<ObjectId>,
    pub created_at: u64,
    pub updated_at: u64,
}
