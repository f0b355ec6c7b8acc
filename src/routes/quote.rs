use actix_web::web;

use crate::handlers::quote::{
    create_quote_handler, delete_quote_handler, get_quote_handler, list_quotes_handler,
    update_quote_status_handler,
};

pub fn configure_quote_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/quotes", web::post().to(create_quote_handler))
        .route("/quotes", web::get().to(list_quotes_handler))
        .route("/quotes/{id}", web::get().to(get_quote_handler))
        .route("/quotes/{id}", web::delete().to(delete_quote_handler))
        .route(
            "/quotes/{id}/status",
            web::put().to(update_quote_status_handler),
        );
}
