use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        event::{
            dto::{CreateEventRequest, EventListQuery, UpdateEventRequest},
            service::EventService,
        },
    },
};

/// GET /events - Published events, optionally only upcoming ones
pub async fn get_events_handler(
    db: web::Data<Database>,
    query: web::Query<EventListQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /events request (upcoming: {})", query.upcoming);

    match EventService::list(&db, query.upcoming).await {
        Ok(events) => {
            info!("Successfully retrieved {} events", events.len());
            Ok(HttpResponse::Ok().json(events))
        }
        Err(e) => {
            error!("Failed to retrieve events: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /events/{id}
pub async fn get_event_handler(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling GET /events/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match EventService::get_by_id(&db, id).await {
        Ok(Some(event)) => Ok(HttpResponse::Ok().json(event)),
        Ok(None) => Err(ApiError::NotFound(format!("Event {} not found", id_str))),
        Err(e) => {
            error!("Failed to retrieve event {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /events
/// Requires API key authentication via X-API-Key header
pub async fn create_event_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    body: web::Json<CreateEventRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /events request");

    match EventService::create(&db, body.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Created().json(event)),
        Err(e) => {
            error!("Failed to create event: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /events/{id}
/// Requires API key authentication via X-API-Key header
pub async fn update_event_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateEventRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /events/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match EventService::update(&db, id, body.into_inner()).await {
        Ok(event) => Ok(HttpResponse::Ok().json(event)),
        Err(e) => {
            error!("Failed to update event {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /events/{id}
/// Requires API key authentication via X-API-Key header
pub async fn delete_event_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /events/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match EventService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!("Event {} not found", id_str))),
        Err(e) => {
            error!("Failed to delete event {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
