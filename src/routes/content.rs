use actix_web::web;

use crate::handlers::content::{get_content_handler, put_content_handler};

pub fn configure_content_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/content/{name}", web::get().to(get_content_handler))
        .route("/content/{name}", web::put().to(put_content_handler));
}
