use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::utils::now_ts;

/// Length of a guest id in hex characters
pub const GUEST_ID_LEN: usize = 32;

/// Anonymous storefront visitor, identified by a cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Guest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<bson::oid::ObjectId>,
    pub guest_id: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    pub created_at: u64,
    pub last_seen_at: u64,
}

impl Guest {
    pub fn new(user_agent: Option<String>) -> Self {
        Self {
            id: None,
            guest_id: generate_guest_id(),
            user_agent,
            created_at: now_ts(),
            last_seen_at: now_ts(),
        }
    }
}

/// 128 random bits, hex encoded
pub fn generate_guest_id() -> String {
    let mut bytes = [0u8; GUEST_ID_LEN / 2];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

pub fn is_valid_guest_id(raw: &str) -> bool {
    raw.len() == GUEST_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = generate_guest_id();
        let b = generate_guest_id();
        assert!(is_valid_guest_id(&a));
        assert!(is_valid_guest_id(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_malformed_ids() {
        assert!(!is_valid_guest_id(""));
        assert!(!is_valid_guest_id("abc"));
        assert!(!is_valid_guest_id(&"G".repeat(GUEST_ID_LEN)));
        assert!(!is_valid_guest_id(&"A".repeat(GUEST_ID_LEN)));
        assert!(is_valid_guest_id(&"0f".repeat(GUEST_ID_LEN / 2)));
    }
}
