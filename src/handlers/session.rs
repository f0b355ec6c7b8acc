use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use std::sync::Arc;

use crate::{config::Config, database::models::guest::is_valid_guest_id, errors::ApiError};

pub const GUEST_ID_HEADER: &str = "X-Guest-Id";

/// Raw guest id carried by the request, cookie first, header second
pub fn guest_id_from_request(req: &HttpRequest, cookie_name: &str) -> Option<String> {
    req.cookie(cookie_name)
        .map(|c| c.value().to_string())
        .or_else(|| {
            req.headers()
                .get(GUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.trim().to_string())
        })
        .filter(|id| !id.is_empty())
}

fn cookie_name(req: &HttpRequest) -> String {
    req.app_data::<web::Data<Arc<Config>>>()
        .map(|c| c.session.cookie_name.clone())
        .unwrap_or_else(|| Config::default().session.cookie_name)
}

/// Guest identity extractor; no database lookup is made
#[derive(Debug, Clone, PartialEq)]
pub struct GuestSession(pub String);

impl GuestSession {
    pub fn guest_id(&self) -> &str {
        &self.0
    }
}

impl FromRequest for GuestSession {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match guest_id_from_request(req, &cookie_name(req)) {
            Some(id) if is_valid_guest_id(&id) => Ok(GuestSession(id)),
            Some(_) => Err(ApiError::Unauthorized("Malformed guest session".to_string()).into()),
            None => Err(ApiError::Unauthorized("Guest session required".to_string()).into()),
        };
        ready(result)
    }
}

/// Like `GuestSession` but never rejects; used where a guest is optional
#[derive(Debug, Clone, PartialEq)]
pub struct MaybeGuest(pub Option<String>);

impl FromRequest for MaybeGuest {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let id = guest_id_from_request(req, &cookie_name(req)).filter(|id| is_valid_guest_id(id));
        ready(Ok(MaybeGuest(id)))
    }
}
