use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::header::USER_AGENT,
    web, HttpRequest, HttpResponse,
};
use log::{error, info};
use mongodb::Database;
use std::sync::Arc;

use crate::{
    config::{Config, SessionConfig},
    errors::ApiError,
    handlers::{
        guest::service::GuestService,
        session::{guest_id_from_request, GuestSession},
    },
};

/// Guest cookie carrying `guest_id`
pub fn session_cookie(config: &SessionConfig, guest_id: &str) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), guest_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(CookieDuration::days(config.cookie_max_age_days))
        .finish()
}

/// POST /session - Resumes the caller's guest session or starts a new one
pub async fn start_session_handler(
    req: HttpRequest,
    db: web::Data<Database>,
    config: web::Data<Arc<Config>>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling POST /session request");

    let existing = guest_id_from_request(&req, &config.session.cookie_name);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.chars().take(256).collect::<String>());

    match GuestService::resume_or_create(&db, existing.as_deref(), user_agent).await {
        Ok(guest) => Ok(HttpResponse::Ok()
            .cookie(session_cookie(&config.session, &guest.guest_id))
            .json(guest)),
        Err(e) => {
            error!("Failed to start guest session: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// GET /session - Returns the current guest
pub async fn get_session_handler(
    session: GuestSession,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling GET /session request");

    match GuestService::get(&db, session.guest_id()).await {
        Ok(Some(guest)) => Ok(HttpResponse::Ok().json(guest)),
        Ok(None) => Err(ApiError::Unauthorized("Unknown guest session".to_string())),
        Err(e) => {
            error!("Failed to load guest session: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// DELETE /session - Ends the guest session and drops its wishlist
pub async fn end_session_handler(
    session: GuestSession,
    db: web::Data<Database>,
    config: web::Data<Arc<Config>>,
) -> Result<HttpResponse, ApiError> {
    info!("Handling DELETE /session request");

    match GuestService::delete(&db, session.guest_id()).await {
        Ok(_) => {
            let mut removal = session_cookie(&config.session, "");
            removal.make_removal();
            Ok(HttpResponse::NoContent().cookie(removal).finish())
        }
        Err(e) => {
            error!("Failed to end guest session: {}", e);
            Err(ApiError::from(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let mut config = Config::default().session;
        config.cookie_secure = true;
        let cookie = session_cookie(&config, "0123456789abcdef0123456789abcdef");

        assert_eq!(cookie.name(), "guest_id");
        assert_eq!(cookie.value(), "0123456789abcdef0123456789abcdef");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(CookieDuration::days(365)));
    }
}
