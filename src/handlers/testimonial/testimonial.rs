use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;

use crate::{
    database::models::parse_object_id,
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        testimonial::{
            dto::{CreateTestimonialRequest, UpdateTestimonialRequest},
            service::TestimonialService,
        },
    },
};

/// GET /testimonials - Published testimonials
pub async fn get_testimonials_handler(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /testimonials request");

    match TestimonialService::list(&db, true).await {
        Ok(testimonials) => Ok(HttpResponse::Ok().json(testimonials)),
        Err(e) => {
            error!("Failed to retrieve testimonials: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /testimonials/all - Every testimonial, for moderation
/// Requires API key authentication via X-API-Key header
pub async fn get_all_testimonials_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /testimonials/all request");

    match TestimonialService::list(&db, false).await {
        Ok(testimonials) => Ok(HttpResponse::Ok().json(testimonials)),
        Err(e) => {
            error!("Failed to retrieve testimonials: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /testimonials - Public submission, held for review
pub async fn submit_testimonial_handler(
    db: web::Data<Database>,
    body: web::Json<CreateTestimonialRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /testimonials request");

    match TestimonialService::create(&db, body.into_inner(), false).await {
        Ok(testimonial) => Ok(HttpResponse::Created().json(testimonial)),
        Err(e) => {
            error!("Failed to store testimonial: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// POST /testimonials/admin
/// Requires API key authentication via X-API-Key header
pub async fn create_testimonial_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    body: web::Json<CreateTestimonialRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /testimonials/admin request");

    match TestimonialService::create(&db, body.into_inner(), true).await {
        Ok(testimonial) => Ok(HttpResponse::Created().json(testimonial)),
        Err(e) => {
            error!("Failed to create testimonial: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// PUT /testimonials/{id}
/// Requires API key authentication via X-API-Key header
pub async fn update_testimonial_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<UpdateTestimonialRequest>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling PUT /testimonials/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match TestimonialService::update(&db, id, body.into_inner()).await {
        Ok(testimonial) => Ok(HttpResponse::Ok().json(testimonial)),
        Err(e) => {
            error!("Failed to update testimonial {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /testimonials/{id}
/// Requires API key authentication via X-API-Key header
pub async fn delete_testimonial_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id_str = path.into_inner();
    info!("Handling DELETE /testimonials/{} request", id_str);
    let id = parse_object_id(&id_str)?;

    match TestimonialService::delete(&db, id).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!(
            "Testimonial {} not found",
            id_str
        ))),
        Err(e) => {
            error!("Failed to delete testimonial {}: {}", id_str, e);
            Err(ApiError::from(e))
        }
    }
}
