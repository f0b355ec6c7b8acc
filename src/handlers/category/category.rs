use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        category::{
            dto::{CreateCategoryRequest, UpdateCategoryRequest},
            service::CategoryService,
        },
    },
};

/// GET /categories - Returns all categories
pub async fn get_categories_handler(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /categories request");

    match CategoryService::get_all(&db).await {
        Ok(categories) => {
            info!("Successfully retrieved {} categories", categories.len());
            Ok(HttpResponse::Ok().json(categories))
        }
        Err(e) => {
            error!("Failed to retrieve categories: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /categories/{slug} - Returns a category by slug
pub async fn get_category_handler(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let slug = path.into_inner();
    info!("Handling GET /categories/{} request", slug);

    match CategoryService::get_by_slug(&db, &slug).await {
        Ok(Some(category)) => Ok(HttpResponse::Ok().json(category)),
        Ok(None) => Err(ApiError::NotFound(format!("Category {} not found", slug))),
        Err(e) => {
            error!("Failed to retrieve category {}: {}", slug, e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /categories - Creates a category
/// Requires API key authentication via X-API-Key header
pub async fn create_category_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    body: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /categories request");

    match CategoryService::create(&db, body.into_inner()).await {
        Ok(category) => {
            info!("Successfully created category {}", category.slug);
            Ok(HttpResponse::Created().json(category))
        }
        Err(e) => {
            error!("Failed to create category: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /categories/{id} - Partially updates a category
/// Requires API key authentication via X-API-Key header
pub async fn update_category_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /categories/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match CategoryService::update(&db, id, body.into_inner()).await {
        Ok(category) => Ok(HttpResponse::Ok().json(category)),
        Err(e) => {
            error!("Failed to update category {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /categories/{id} - Deletes an unused category
/// Requires API key authentication via X-API-Key header
pub async fn delete_category_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /categories/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match CategoryService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!("Category {} not found", id_str))),
        Err(e) => {
            error!("Failed to delete category {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
