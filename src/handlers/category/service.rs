use bson::{doc, oid::ObjectId};
use log::{debug, info};
use mongodb::Database;

use crate::{
    database::{
        collections,
        models::{
            slugify,
            utils::{id_to_string, non_empty, now_ts},
            Category, Product,
        },
        query::find_all,
    },
    errors::ApiError,
    handlers::category::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
};

/// Service layer for category-related business logic
pub struct CategoryService;

impl CategoryService {
    /// All categories ordered for navigation menus
    pub async fn get_all(db: &Database) -> anyhow::Result<Vec<CategoryResponse>> {
        debug!("Fetching all categories");

        let collection = db.collection::<Category>(collections::CATEGORIES);
        let categories = find_all(&collection, doc! {}, doc! { "sort_order": 1, "name": 1 }).await?;

        debug!("Retrieved {} categories from database", categories.len());
        Ok(categories.into_iter().map(Self::map_to_response).collect())
    }

    pub async fn get_by_slug(db: &Database, slug: &str) -> anyhow::Result<Option<CategoryResponse>> {
        debug!("Fetching category with slug: {}", slug);

        let collection = db.collection::<Category>(collections::CATEGORIES);
        let category = collection
            .find_one(doc! { "slug": slug.trim().to_lowercase() })
            .await?;

        Ok(category.map(Self::map_to_response))
    }

    /// Create a category; the slug defaults to the slugified name
    pub async fn create(
        db: &Database,
        request: CreateCategoryRequest,
    ) -> anyhow::Result<CategoryResponse> {
        let mut category = build_category(request)?;
        debug!("Creating category with slug: {}", category.slug);

        Self::ensure_parent(db, &category).await?;

        let collection = db.collection::<Category>(collections::CATEGORIES);
        let result = collection.insert_one(&category).await?;
        category.id = result.inserted_id.as_object_id();

        info!("Created category {}", category.slug);
        Ok(Self::map_to_response(category))
    }

    /// Partial update; a slug change is carried over to products and child categories
    pub async fn update(
        db: &Database,
        id: ObjectId,
        request: UpdateCategoryRequest,
    ) -> anyhow::Result<CategoryResponse> {
        let collection = db.collection::<Category>(collections::CATEGORIES);
        let existing = collection
            .find_one(doc! { "_id": id })
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Category {} not found", id)))?;

        let old_slug = existing.slug.clone();
        let category = apply_update(existing, request)?;
        Self::ensure_parent(db, &category).await?;

        collection
            .replace_one(doc! { "_id": id }, &category)
            .await?;

        if category.slug != old_slug {
            let now = now_ts() as i64;
            let products = db
                .collection::<Product>(collections::PRODUCTS)
                .update_many(
                    doc! { "category": &old_slug },
                    doc! { "$set": { "category": &category.slug, "updated_at": now } },
                )
                .await?;
            collection
                .update_many(
                    doc! { "parent": &old_slug },
                    doc! { "$set": { "parent": &category.slug, "updated_at": now } },
                )
                .await?;
            info!(
                "Renamed category {} to {} ({} products moved)",
                old_slug, category.slug, products.modified_count
            );
        }

        Ok(Self::map_to_response(category))
    }

    /// Delete a category that nothing references any more
    pub async fn delete(db: &Database, id: ObjectId) -> anyhow::Result<bool> {
        let collection = db.collection::<Category>(collections::CATEGORIES);
        let Some(category) = collection.find_one(doc! { "_id": id }).await? else {
            debug!("Category {} not found", id);
            return Ok(false);
        };

        let products = db
            .collection::<Product>(collections::PRODUCTS)
            .count_documents(doc! { "category": &category.slug })
            .await?;
        if products > 0 {
            return Err(ApiError::Conflict(format!(
                "Category {} is used by {} products",
                category.slug, products
            ))
            .into());
        }

        let children = collection
            .count_documents(doc! { "parent": &category.slug })
            .await?;
        if children > 0 {
            return Err(ApiError::Conflict(format!(
                "Category {} has {} child categories",
                category.slug, children
            ))
            .into());
        }

        let result = collection.delete_one(doc! { "_id": id }).await?;
        info!("Deleted category {}", category.slug);
        Ok(result.deleted_count > 0)
    }

    async fn ensure_parent(db: &Database, category: &Category) -> anyhow::Result<()> {
        let Some(parent) = &category.parent else {
            return Ok(());
        };

        let exists = db
            .collection::<Category>(collections::CATEGORIES)
            .count_documents(doc! { "slug": parent })
            .await?
            > 0;
        if !exists {
            return Err(ApiError::BadRequest(format!("Unknown parent category '{}'", parent)).into());
        }
        Ok(())
    }

    /// Map Category model to CategoryResponse DTO
    fn map_to_response(category: Category) -> CategoryResponse {
        CategoryResponse {
            id: id_to_string(category.id),
            name: category.name,
            slug: category.slug,
            description: category.description,
            image: category.image,
            parent: category.parent,
            sort_order: category.sort_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

fn resolve_slug(name: &str, requested: Option<String>) -> Result<String, ApiError> {
    let slug = match non_empty(requested) {
        Some(slug) => slugify(&slug),
        None => slugify(name),
    };
    if slug.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Cannot derive a slug from '{}'",
            name
        )));
    }
    Ok(slug)
}

fn check_parent(category: &Category) -> Result<(), ApiError> {
    if category.parent.as_deref() == Some(category.slug.as_str()) {
        return Err(ApiError::BadRequest(
            "A category cannot be its own parent".to_string(),
        ));
    }
    Ok(())
}

pub fn build_category(request: CreateCategoryRequest) -> Result<Category, ApiError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let slug = resolve_slug(&name, request.slug)?;
    let mut category = Category::new(name, slug);
    category.description = non_empty(request.description);
    category.image = non_empty(request.image);
    category.parent = non_empty(request.parent).map(|p| slugify(&p));
    category.sort_order = request.sort_order.unwrap_or(0);

    check_parent(&category)?;
    Ok(category)
}

pub fn apply_update(
    mut category: Category,
    request: UpdateCategoryRequest,
) -> Result<Category, ApiError> {
    if let Some(name) = request.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::BadRequest("name must not be empty".to_string()));
        }
        category.name = name;
    }
    if request.slug.is_some() {
        category.slug = resolve_slug(&category.name, request.slug)?;
    }
    if request.description.is_some() {
        category.description = non_empty(request.description);
    }
    if request.image.is_some() {
        category.image = non_empty(request.image);
    }
    if request.parent.is_some() {
        category.parent = non_empty(request.parent).map(|p| slugify(&p));
    }
    if let Some(sort_order) = request.sort_order {
        category.sort_order = sort_order;
    }
    category.updated_at = now_ts();

    check_parent(&category)?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.into(),
            slug: None,
            description: None,
            image: None,
            parent: None,
            sort_order: None,
        }
    }

    #[test]
    fn test_slug_defaults_to_name() {
        let category = build_category(request("Engagement Rings")).unwrap();
        assert_eq!(category.slug, "engagement-rings");
        assert_eq!(category.sort_order, 0);
    }

    #[test]
    fn test_explicit_slug_is_slugified() {
        let mut req = request("Rings");
        req.slug = Some("Wedding Bands".into());
        assert_eq!(build_category(req).unwrap().slug, "wedding-bands");
    }

    #[test]
    fn test_rejects_unsluggable_name() {
        assert!(build_category(request("!!!")).is_err());
        assert!(build_category(request("   ")).is_err());
    }

    #[test]
    fn test_rejects_self_parent() {
        let mut req = request("Rings");
        req.parent = Some("rings".into());
        assert!(matches!(build_category(req), Err(ApiError::BadRequest(_))));
    }

    #[test]
    fn test_update_slug_only_when_requested() {
        let category = build_category(request("Rings")).unwrap();
        let renamed = apply_update(
            category,
            UpdateCategoryRequest {
                name: Some("Statement Rings".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(renamed.name, "Statement Rings");
        assert_eq!(renamed.slug, "rings");

        let reslugged = apply_update(
            renamed,
            UpdateCategoryRequest {
                slug: Some("statement rings".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(reslugged.slug, "statement-rings");
    }
}
