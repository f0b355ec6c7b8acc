use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::{parse_object_id, QuoteStatus},
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        quote::{
            dto::{CreateQuoteRequest, QuoteListQuery, UpdateQuoteStatusRequest},
            service::QuoteService,
        },
        session::MaybeGuest,
    },
    services::Mailer,
};

/// POST /quotes - Submits a quote request
pub async fn create_quote_handler(
    guest: MaybeGuest,
    db: web::Data<Database>,
    mailer: web::Data<Mailer>,
    body: web::Json<CreateQuoteRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /quotes request");

    match QuoteService::create(&db, &mailer, guest.0, body.into_inner()).await {
        Ok(quote) => Ok(HttpResponse::Created().json(quote)),
        Err(e) => {
            error!("Failed to create quote: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /quotes - Lists quote requests
/// Requires API key authentication via X-API-Key header
pub async fn list_quotes_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    query: web::Query<QuoteListQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /quotes request");

    match QuoteService::list(&db, &query).await {
        Ok(page) => {
            info!("Successfully retrieved {} quotes", page.data.len());
            Ok(HttpResponse::Ok().json(page))
        }
        Err(e) => {
            error!("Failed to retrieve quotes: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /quotes/{id}
/// Requires API key authentication via X-API-Key header
pub async fn get_quote_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling GET /quotes/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match QuoteService::get_by_id(&db, id).await {
        Ok(Some(quote)) => Ok(HttpResponse::Ok().json(quote)),
        Ok(None) => Err(ApiError::NotFound(format!("Quote {} not found", id_str))),
        Err(e) => {
            error!("Failed to retrieve quote {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /quotes/{id}/status - Moves a quote through its workflow
/// Requires API key authentication via X-API-Key header
pub async fn update_quote_status_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateQuoteStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /quotes/{}/status request", id_str);
    let id = parse_object_id(&id_str)?;
    let status = body
        .status
        .parse::<QuoteStatus>()
        .map_err(ApiError::BadRequest)?;

    match QuoteService::update_status(&db, id, status).await {
        Ok(Some(quote)) => Ok(HttpResponse::Ok().json(quote)),
        Ok(None) => Err(ApiError::NotFound(format!("Quote {} not found", id_str))),
        Err(e) => {
            error!("Failed to update quote {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /quotes/{id}
/// Requires API key authentication via X-API-Key header
pub async fn delete_quote_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /quotes/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match QuoteService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!("Quote {} not found", id_str))),
        Err(e) => {
            error!("Failed to delete quote {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
