use serde::Serialize;

/// Response model for the guest session endpoints
#[derive(Debug, Serialize)]
pub struct GuestResponse {
    pub guest_id: String,
    pub created_at: u64,
    pub last_seen_at: u64,
}
