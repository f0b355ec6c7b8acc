use actix_web::web;

use crate::handlers::category::{
    create_category_handler, delete_category_handler, get_categories_handler,
    get_category_handler, update_category_handler,
};

pub fn configure_category_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/categories", web::get().to(get_categories_handler))
        .route("/categories", web::post().to(create_category_handler))
        .route("/categories/{slug}", web::get().to(get_category_handler))
        .route("/categories/{id}", web::put().to(update_category_handler))
        .route("/categories/{id}", web::delete().to(delete_category_handler));
}
