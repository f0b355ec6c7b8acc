use actix_web::web;

use crate::handlers::wishlist::{
    add_wishlist_item_handler, clear_wishlist_handler, get_wishlist_handler,
    remove_wishlist_item_handler,
};

pub fn configure_wishlist_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/wishlist", web::get().to(get_wishlist_handler))
        .route("/wishlist", web::delete().to(clear_wishlist_handler))
        .route("/wishlist/items", web::post().to(add_wishlist_item_handler))
        .route(
            "/wishlist/items/{product_id}",
            web::delete().to(remove_wishlist_item_handler),
        );
}
