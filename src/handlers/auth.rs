use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use log::warn;
use std::sync::Arc;

use crate::{config::Config, errors::ApiError};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Admin API key extractor.
///
/// Compares the `X-API-Key` header with `server.api_key`. When no key is
/// configured every request is let through (development mode).
pub struct ApiKey(pub String);

impl FromRequest for ApiKey {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let config = req
            .app_data::<web::Data<Arc<Config>>>()
            .map(|c| c.get_ref().clone());

        let header_key = req
            .headers()
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        match (config, header_key) {
            (Some(config), Some(header_key)) => match &config.server.api_key {
                Some(configured_key) if configured_key == &header_key => {
                    ready(Ok(ApiKey(header_key)))
                }
                Some(_) => {
                    warn!("Invalid API key provided");
                    ready(Err(
                        ApiError::Unauthorized("Invalid API key".to_string()).into()
                    ))
                }
                None => {
                    warn!("API key not configured, allowing access");
                    ready(Ok(ApiKey(header_key)))
                }
            },
            (Some(config), None) => {
                if config.server.api_key.is_some() {
                    warn!("API key required but not provided");
                    ready(Err(
                        ApiError::Unauthorized("API key required".to_string()).into()
                    ))
                } else {
                    warn!("API key not configured, allowing access");
                    ready(Ok(ApiKey(String::new())))
                }
            }
            _ => {
                warn!("Config not found in app data");
                ready(Err(ApiError::InternalError.into()))
            }
        }
    }
}
