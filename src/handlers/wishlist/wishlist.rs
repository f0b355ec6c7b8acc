use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    handlers::{
        session::GuestSession,
        wishlist::{dto::AddWishlistItemRequest, service::WishlistService},
    },
};

/// GET /wishlist - Returns the guest's saved products
pub async fn get_wishlist_handler(
    session: GuestSession,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /wishlist request");

    match WishlistService::get(&db, session.guest_id()).await {
        Ok(wishlist) => Ok(HttpResponse::Ok().json(wishlist)),
        Err(e) => {
            error!("Failed to retrieve wishlist: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /wishlist/items - Saves a product to the guest's wishlist
pub async fn add_wishlist_item_handler(
    session: GuestSession,
    db: web::Data<Database>,
    body: web::Json<AddWishlistItemRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /wishlist/items request");
    let product_id = parse_object_id(&body.product_id)?;

    if let Err(e) = WishlistService::add(&db, session.guest_id(), product_id).await {
        error!("Failed to add wishlist item: {}", e);
        return Err(ApiError::from(e));
    }

    match WishlistService::get(&db, session.guest_id()).await {
        Ok(wishlist) => Ok(HttpResponse::Ok().json(wishlist)),
        Err(e) => Err(ApiError::from(e)),
    }
}

/// DELETE /wishlist/items/{product_id} - Removes one product
pub async fn remove_wishlist_item_handler(
    session: GuestSession,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /wishlist/items/{} request", id_str);
    let product_id = parse_object_id(&id_str)?;

    match WishlistService::remove(&db, session.guest_id(), product_id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => {
            error!("Failed to remove wishlist item: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /wishlist - Empties the wishlist
pub async fn clear_wishlist_handler(
    session: GuestSession,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling DELETE /wishlist request");

    match WishlistService::clear(&db, session.guest_id()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => {
            error!("Failed to clear wishlist: {}", e);
            Err(ApiError::from(e))
        }
    }
}
