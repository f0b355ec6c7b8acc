use actix_multipart::Multipart;
use actix_web::{
    http::header::{CacheControl, CacheDirective},
    web, HttpResponse,
};
use futures::TryStreamExt;
use log::{debug, error, info, warn};

use crate::{
    errors::ApiError,
    handlers::auth::ApiKey,
    services::storage::{content_type_for, extension_of, FileStorage, StoredFile},
};

const CACHE_MAX_AGE_SECS: u32 = 31_536_000;

/// POST /uploads - Stores every file part of a multipart body
/// Requires API key authentication via X-API-Key header
pub async fn upload_files_handler(
    _api_key: ApiKey,
    storage: web::Data<FileStorage>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /uploads request");
    // Every part is checked before anything touches the disk
    let mut accepted: Vec<(String, String, Vec<u8>)> = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            debug!("Skipping non-file multipart field");
            continue;
        };
        let extension = storage.accepted_extension(&filename)?;

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read '{}': {}", filename, e)))?
        {
            bytes.extend_from_slice(&chunk);
            storage.check_size(bytes.len())?;
        }

        accepted.push((filename, extension, bytes));
    }

    if accepted.is_empty() {
        return Err(ApiError::BadRequest(
            "No files found in the request".to_string(),
        ));
    }

    let mut stored: Vec<StoredFile> = Vec::with_capacity(accepted.len());
    for (filename, extension, bytes) in accepted {
        match storage.save(&extension, &bytes).await {
            Ok(file) => {
                debug!("Stored '{}' as {}", filename, file.name);
                stored.push(file);
            }
            Err(e) => {
                error!("Failed to store '{}': {}", filename, e);
                discard(&storage, &stored).await;
                return Err(ApiError::from(e));
            }
        }
    }

    info!("Stored {} uploaded files", stored.len());
    Ok(HttpResponse::Created().json(stored))
}

/// Removes files written by a request that failed part way
async fn discard(storage: &FileStorage, stored: &[StoredFile]) {
    for file in stored {
        if let Err(e) = storage.delete(&file.name).await {
            warn!("Could not remove partial upload {}: {}", file.name, e);
        }
    }
}

/// GET /uploads/{name} - Serves a stored file
pub async fn get_upload_handler(
    storage: web::Data<FileStorage>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    debug!("Handling GET /uploads/{} request", name);

    match storage.read(&name).await {
        Ok(Some(bytes)) => {
            Ok(HttpResponse::Ok()
                .content_type(content_type_for(extension_of(&name)))
                .insert_header(CacheControl(vec![
                    CacheDirective::Public,
                    CacheDirective::MaxAge(CACHE_MAX_AGE_SECS),
                ]))
                .body(bytes))
        }
        Ok(None) => Err(ApiError::NotFound(format!("File {} not found", name))),
        Err(e) => Err(ApiError::from(e)),
    }
}

/// DELETE /uploads/{name}
/// Requires API key authentication via X-API-Key header
pub async fn delete_upload_handler(
    _api_key: ApiKey,
    storage: web::Data<FileStorage>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    info!("Handling DELETE /uploads/{} request", name);

    match storage.delete(&name).await {
        Ok(true) => Ok(HttpResponse::NoContent().finish()),
        Ok(false) => Err(ApiError::NotFound(format!("File {} not found", name))),
        Err(e) => {
            error!("Failed to delete upload {}: {}", name, e);
            Err(ApiError::from(e))
        }
    }
}
