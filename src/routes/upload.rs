use actix_web::web;

use crate::handlers::upload::{delete_upload_handler, get_upload_handler, upload_files_handler};

pub fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/uploads", web::post().to(upload_files_handler))
        .route("/uploads/{name}", web::get().to(get_upload_handler))
        .route("/uploads/{name}", web::delete().to(delete_upload_handler));
}
