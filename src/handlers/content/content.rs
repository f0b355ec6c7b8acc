use actix_web::{web, HttpResponse};
use log::{error, info};
use mongodb::Database;
use serde::Serialize;

use crate::{
    database::models::{AboutContent, HomeContent, UiContent},
    errors::ApiError,
    handlers::{
        auth::ApiKey,
        content::service::{ContentKind, ContentService},
    },
};

fn respond<B: Serialize>(name: &str, result: anyhow::Result<B>) -> Result<HttpResponse, ApiError> {
    match result {
        Ok(block) => Ok(HttpResponse::Ok().json(block)),
        Err(e) => {
            error!("Content block {} failed: {}", name, e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /content/{name} - Returns a content block (home, about or ui)
pub async fn get_content_handler(
    db: web::Data<Database>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    info!("Handling GET /content/{} request", name);

    match name.parse::<ContentKind>()? {
        ContentKind::Home => respond(&name, ContentService::get::<HomeContent>(&db).await),
        ContentKind::About => respond(&name, ContentService::get::<AboutContent>(&db).await),
        ContentKind::Ui => respond(&name, ContentService::get::<UiContent>(&db).await),
    }
}

/// PUT /content/{name} - Replaces a content block
/// Requires API key authentication via X-API-Key header
pub async fn put_content_handler(
    _api_key: ApiKey,
    db: web::Data<Database>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    info!("Handling PUT /content/{} request", name);
    let body = body.into_inner();

    match name.parse::<ContentKind>()? {
        ContentKind::Home => respond(&name, ContentService::put::<HomeContent>(&db, body).await),
        ContentKind::About => respond(&name, ContentService::put::<AboutContent>(&db, body).await),
        ContentKind::Ui => respond(&name, ContentService::put::<UiContent>(&db, body).await),
    }
}
