use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    filters::{DiamondQuery, JewelryQuery},
    handlers::{
        auth::ApiKey,
        product::{
            dto::{CreateProductRequest, ProductListQuery, UpdateProductRequest},
            service::ProductService,
        },
    },
};

/// GET /diamonds - Filtered, paginated diamond search
pub async fn list_diamonds_handler(
    db: web::Data<Database>,
    query: web::Query<DiamondQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /diamonds request");

    match ProductService::list_diamonds(&db, &query).await {
        Ok(page) => {
            info!(
                "Successfully retrieved {} diamonds (total {})",
                page.data.len(),
                page.pagination.total
            );
            Ok(HttpResponse::Ok().json(page))
        }
        Err(e) => {
            error!("Failed to retrieve diamonds: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /diamonds/filters - Facet values for the diamond search
pub async fn diamond_facets_handler(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /diamonds/filters request");

    match ProductService::diamond_facets(&db).await {
        Ok(facets) => Ok(HttpResponse::Ok().json(facets)),
        Err(e) => {
            error!("Failed to compute diamond facets: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /jewelry - Filtered, paginated jewelry search
pub async fn list_jewelry_handler(
    db: web::Data<Database>,
    query: web::Query<JewelryQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /jewelry request");

    match ProductService::list_jewelry(&db, &query).await {
        Ok(page) => {
            info!(
                "Successfully retrieved {} jewelry items (total {})",
                page.data.len(),
                page.pagination.total
            );
            Ok(HttpResponse::Ok().json(page))
        }
        Err(e) => {
            error!("Failed to retrieve jewelry: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /jewelry/filters - Facet values for the jewelry search
pub async fn jewelry_facets_handler(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /jewelry/filters request");

    match ProductService::jewelry_facets(&db).await {
        Ok(facets) => Ok(HttpResponse::Ok().json(facets)),
        Err(e) => {
            error!("Failed to compute jewelry facets: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /products - Admin listing of every product
/// Requires API key authentication via X-API-Key header
pub async fn list_products_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /products request");

    match ProductService::list_all(&db, &query).await {
        Ok(page) => {
            info!("Successfully retrieved {} products", page.data.len());
            Ok(HttpResponse::Ok().json(page))
        }
        Err(e) => {
            error!("Failed to retrieve products: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /products/{id} - Returns a product by id
pub async fn get_product_handler(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling GET /products/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match ProductService::get_by_id(&db, id).await {
        Ok(Some(product)) => Ok(HttpResponse::Ok().json(product)),
        Ok(None) => {
            info!("Product {} not found", id_str);
            Err(ApiError::NotFound(format!("Product {} not found", id_str)))
        }
        Err(e) => {
            error!("Failed to retrieve product {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /products/sku/{sku} - Returns a product by SKU
pub async fn get_product_by_sku_handler(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let sku = path.into_inner();
    info!("Handling GET /products/sku/{} request", sku);

    match ProductService::get_by_sku(&db, &sku).await {
        Ok(Some(product)) => Ok(HttpResponse::Ok().json(product)),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Product with sku {} not found",
            sku
        ))),
        Err(e) => {
            error!("Failed to retrieve product {}: {}", sku, e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /products - Creates a new product
/// Requires API key authentication via X-API-Key header
pub async fn create_product_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /products request");

    match ProductService::create(&db, body.into_inner()).await {
        Ok(product) => {
            info!("Successfully created product {}", product.sku);
            Ok(HttpResponse::Created().json(product))
        }
        Err(e) => {
            error!("Failed to create product: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /products/{id} - Partially updates a product
/// Requires API key authentication via X-API-Key header
pub async fn update_product_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /products/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match ProductService::update(&db, id, body.into_inner()).await {
        Ok(product) => {
            info!("Successfully updated product {}", id_str);
            Ok(HttpResponse::Ok().json(product))
        }
        Err(e) => {
            error!("Failed to update product {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /products/{id} - Deletes a product
/// Requires API key authentication via X-API-Key header
pub async fn delete_product_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /products/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match ProductService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!("Product {} not found", id_str))),
        Err(e) => {
            error!("Failed to delete product {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
