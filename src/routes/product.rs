use actix_web::web;

use crate::handlers::product::{
    create_product_handler, delete_product_handler, diamond_facets_handler,
    get_product_by_sku_handler, get_product_handler, jewelry_facets_handler,
    list_diamonds_handler, list_jewelry_handler, list_products_handler, update_product_handler,
};

pub fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/diamonds", web::get().to(list_diamonds_handler))
        .route("/diamonds/filters", web::get().to(diamond_facets_handler))
        .route("/jewelry", web::get().to(list_jewelry_handler))
        .route("/jewelry/filters", web::get().to(jewelry_facets_handler))
        .route("/products", web::get().to(list_products_handler))
        .route("/products", web::post().to(create_product_handler))
        .route(
            "/products/sku/{sku}",
            web::get().to(get_product_by_sku_handler),
        )
        .route("/products/{id}", web::get().to(get_product_handler))
        .route("/products/{id}", web::put().to(update_product_handler))
        .route("/products/{id}", web::delete().to(delete_product_handler));
}
