use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        form::{
            dto::{CreateFormRequest, FormListQuery, MarkHandledRequest},
            service::FormService,
        },
    },
    services::Mailer,
};

/// POST /forms - Contact or appointment submission
pub async fn submit_form_handler(
    db: web::Data<Database>,
    mailer: web::Data<Mailer>,
    body: web::Json<CreateFormRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /forms request");

    match FormService::submit(&db, &mailer, body.into_inner()).await {
        Ok(form) => Ok(HttpResponse::Created().json(form)),
        Err(e) => {
            error!("Failed to store form submission: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /forms
/// Requires API key authentication via X-API-Key header
pub async fn list_forms_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    query: web::Query<FormListQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /forms request");

    match FormService::list(&db, &query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(page)),
        Err(e) => {
            error!("Failed to retrieve form submissions: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /forms/{id}/handled
/// Requires API key authentication via X-API-Key header
pub async fn mark_form_handled_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<MarkHandledRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /forms/{}/handled request", id_str);
    let id = parse_object_id(&id_str)?;

    match FormService::mark_handled(&db, id, body.handled).await {
        Ok(Some(form)) => Ok(HttpResponse::Ok().json(form)),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Form submission {} not found",
            id_str
        ))),
        Err(e) => {
            error!("Failed to update form submission {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /forms/{id}
/// Requires API key authentication via X-API-Key header
pub async fn delete_form_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /forms/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match FormService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!(
            "Form submission {} not found",
            id_str
        ))),
        Err(e) => {
            error!("Failed to delete form submission {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
