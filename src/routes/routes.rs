use actix_web::{error::JsonPayloadError, web, HttpResponse, Result};

use crate::errors::ApiError;
use crate::routes::{
    category::configure_category_routes, content::configure_content_routes,
    event::configure_event_routes, form::configure_form_routes,
    product::configure_product_routes, quote::configure_quote_routes,
    session::configure_session_routes, testimonial::configure_testimonial_routes,
    upload::configure_upload_routes, wishlist::configure_wishlist_routes,
};

/// Health check endpoint
async fn health_check() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

/// JSON body limits, with extractor failures rendered like every other error
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let api_error = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    ApiError::PayloadTooLarge(err.to_string())
                }
                JsonPayloadError::ContentType => ApiError::UnsupportedMediaType(err.to_string()),
                _ => ApiError::BadRequest(err.to_string()),
            };
            api_error.into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .app_data(query_config())
            .app_data(path_config())
            .route("/health", web::get().to(health_check))
            .configure(configure_product_routes)
            .configure(configure_category_routes)
            .configure(configure_session_routes)
            .configure(configure_wishlist_routes)
            .configure(configure_quote_routes)
            .configure(configure_testimonial_routes)
            .configure(configure_event_routes)
            .configure(configure_content_routes)
            .configure(configure_form_routes)
            .configure(configure_upload_routes),
    );
}
