use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use log::{debug, info};
use mongodb::Database;
use std::collections::HashMap;

use crate::{
    database::{
        collections,
        models::{now_ts, wishlist::MAX_WISHLIST_ITEMS, Product, Wishlist},
    },
    errors::{is_duplicate_key, ApiError},
    handlers::{
        product::{dto::ProductResponse, service::ProductService},
        wishlist::dto::WishlistResponse,
    },
};

/// Service layer for guest wishlists
pub struct WishlistService;

impl WishlistService {
    /// Saved products in the order they were added
    pub async fn get(db: &Database, guest_id: &str) -> anyhow::Result<WishlistResponse> {
        debug!("Fetching wishlist for guest {}", guest_id);

        let wishlist = db
            .collection::<Wishlist>(collections::WISHLISTS)
            .find_one(doc! { "guest_id": guest_id })
            .await?;
        let product_ids = wishlist.map(|w| w.product_ids).unwrap_or_default();

        let products = if product_ids.is_empty() {
            Vec::new()
        } else {
            db.collection::<Product>(collections::PRODUCTS)
                .find(doc! { "_id": { "$in": product_ids.clone() } })
                .await?
                .try_collect::<Vec<Product>>()
                .await?
        };

        let items = order_by_ids(&product_ids, products)
            .into_iter()
            .map(ProductService::map_to_response)
            .collect::<Vec<ProductResponse>>();

        Ok(WishlistResponse {
            guest_id: guest_id.to_string(),
            count: items.len(),
            items,
        })
    }

    /// Add a product; adding one that is already saved is a no-op
    pub async fn add(db: &Database, guest_id: &str, product_id: ObjectId) -> anyhow::Result<()> {
        if !ProductService::exists(db, product_id).await? {
            return Err(ApiError::NotFound(format!("Product {} not found", product_id)).into());
        }

        let now = now_ts() as i64;
        let result = db
            .collection::<Wishlist>(collections::WISHLISTS)
            .update_one(
                add_filter(guest_id, product_id),
                doc! {
                    "$addToSet": { "product_ids": product_id },
                    "$set": { "updated_at": now },
                    "$setOnInsert": { "created_at": now },
                },
            )
            .upsert(true)
            .await;

        // A full wishlist fails the filter, so the upsert collides with the unique guest_id
        match result {
            Ok(_) => {}
            Err(e) if is_duplicate_key(&e) => {
                return Err(ApiError::BadRequest(format!(
                    "A wishlist holds at most {} items",
                    MAX_WISHLIST_ITEMS
                ))
                .into());
            }
            Err(e) => return Err(e.into()),
        }

        info!("Added product {} to wishlist of {}", product_id, guest_id);
        Ok(())
    }

    pub async fn remove(db: &Database, guest_id: &str, product_id: ObjectId) -> anyhow::Result<()> {
        db.collection::<Wishlist>(collections::WISHLISTS)
            .update_one(
                doc! { "guest_id": guest_id },
                doc! {
                    "$pull": { "product_ids": product_id },
                    "$set": { "updated_at": now_ts() as i64 },
                },
            )
            .await?;

        debug!("Removed product {} from wishlist of {}", product_id, guest_id);
        Ok(())
    }

    pub async fn clear(db: &Database, guest_id: &str) -> anyhow::Result<()> {
        db.collection::<Wishlist>(collections::WISHLISTS)
            .update_one(
                doc! { "guest_id": guest_id },
                doc! { "$set": { "product_ids": [], "updated_at": now_ts() as i64 } },
            )
            .await?;

        info!("Cleared wishlist of {}", guest_id);
        Ok(())
    }
}

/// Matches the guest's wishlist only while `product_id` can still be added:
/// it is already saved, or the list is below the cap.
pub fn add_filter(guest_id: &str, product_id: ObjectId) -> Document {
    let mut below_cap = Document::new();
    below_cap.insert(
        format!("product_ids.{}", MAX_WISHLIST_ITEMS - 1),
        doc! { "$exists": false },
    );

    doc! {
        "guest_id": guest_id,
        "$or": [{ "product_ids": product_id }, below_cap],
    }
}

/// Reorder fetched products to follow `ids`, skipping ids with no product
pub fn order_by_ids(ids: &[ObjectId], products: Vec<Product>) -> Vec<Product> {
    let mut by_id: HashMap<ObjectId, Product> = products
        .into_iter()
        .filter_map(|p| p.id.map(|id| (id, p)))
        .collect();

    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ProductType;

    fn product_with_id(id: ObjectId, sku: &str) -> Product {
        let mut product = Product::new(sku.into(), sku.into(), ProductType::Jewelry, 100.0);
        product.id = Some(id);
        product
    }

    #[test]
    fn test_order_by_ids_follows_wishlist_order() {
        let (a, b, c) = (ObjectId::new(), ObjectId::new(), ObjectId::new());
        let fetched = vec![product_with_id(c, "C"), product_with_id(a, "A")];

        let ordered = order_by_ids(&[a, b, c], fetched);
        let skus: Vec<&str> = ordered.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "C"]);
    }

    #[test]
    fn test_add_filter_caps_the_list() {
        let product_id = ObjectId::new();
        let filter = add_filter("0123456789abcdef0123456789abcdef", product_id);

        assert_eq!(filter.get_str("guest_id").unwrap(), "0123456789abcdef0123456789abcdef");
        let branches = filter.get_array("$or").unwrap();
        assert_eq!(
            branches[0].as_document().unwrap(),
            &doc! { "product_ids": product_id }
        );
        assert_eq!(
            branches[1].as_document().unwrap(),
            &doc! { "product_ids.99": { "$exists": false } }
        );
    }

    #[test]
    fn test_order_by_ids_empty() {
        assert!(order_by_ids(&[], Vec::new()).is_empty());
    }
}
