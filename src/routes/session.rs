use actix_web::web;

use crate::handlers::guest::{end_session_handler, get_session_handler, start_session_handler};

pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/session", web::post().to(start_session_handler))
        .route("/session", web::get().to(get_session_handler))
        .route("/session", web::delete().to(end_session_handler));
}
