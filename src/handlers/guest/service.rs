use bson::doc;
use log::{debug, info};
use mongodb::{options::ReturnDocument, Database};

use crate::{
    database::{
        collections,
        models::{guest::is_valid_guest_id, now_ts, Guest, Wishlist},
    },
    handlers::guest::dto::GuestResponse,
};

/// Service layer for guest identification
pub struct GuestService;

impl GuestService {
    /// Touch a known guest or register a new one
    pub async fn resume_or_create(
        db: &Database,
        guest_id: Option<&str>,
        user_agent: Option<String>,
    ) -> anyhow::Result<GuestResponse> {
        if let Some(guest_id) = guest_id.filter(|id| is_valid_guest_id(id)) {
            if let Some(guest) = Self::touch(db, guest_id).await? {
                debug!("Resumed guest session {}", guest_id);
                return Ok(Self::map_to_response(guest));
            }
            debug!("Unknown guest {}, issuing a new id", guest_id);
        }

        let guest = Guest::new(user_agent);
        db.collection::<Guest>(collections::GUESTS)
            .insert_one(&guest)
            .await?;

        info!("Created guest session {}", guest.guest_id);
        Ok(Self::map_to_response(guest))
    }

    /// Update `last_seen_at`; `None` if the guest does not exist
    pub async fn touch(db: &Database, guest_id: &str) -> anyhow::Result<Option<Guest>> {
        let guest = db
            .collection::<Guest>(collections::GUESTS)
            .find_one_and_update(
                doc! { "guest_id": guest_id },
                doc! { "$set": { "last_seen_at": now_ts() as i64 } },
            )
            .return_document(ReturnDocument::After)
            .await?;
        Ok(guest)
    }

    pub async fn get(db: &Database, guest_id: &str) -> anyhow::Result<Option<GuestResponse>> {
        let guest = db
            .collection::<Guest>(collections::GUESTS)
            .find_one(doc! { "guest_id": guest_id })
            .await?;
        Ok(guest.map(Self::map_to_response))
    }

    /// Forget a guest and its wishlist
    pub async fn delete(db: &Database, guest_id: &str) -> anyhow::Result<bool> {
        let result = db
            .collection::<Guest>(collections::GUESTS)
            .delete_one(doc! { "guest_id": guest_id })
            .await?;
        db.collection::<Wishlist>(collections::WISHLISTS)
            .delete_one(doc! { "guest_id": guest_id })
            .await?;

        if result.deleted_count > 0 {
            info!("Deleted guest session {}", guest_id);
        }
        Ok(result.deleted_count > 0)
    }

    fn map_to_response(guest: Guest) -> GuestResponse {
        GuestResponse {
            guest_id: guest.guest_id,
            created_at: guest.created_at,
            last_seen_at: guest.last_seen_at,
        }
    }
}
