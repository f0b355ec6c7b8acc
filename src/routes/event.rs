use actix_web::web;

use crate::handlers::event::{
    create_event_handler, delete_event_handler, get_event_handler, get_events_handler,
    update_event_handler,
};

pub fn configure_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::get().to(get_events_handler))
        .route("/events", web::post().to(create_event_handler))
        .route("/events/{id}", web::get().to(get_event_handler))
        .route("/events/{id}", web::put().to(update_event_handler))
        .route("/events/{id}", web::delete().to(delete_event_handler));
}
