use actix_web::web;

use crate::handlers::testimonial::{
    create_testimonial_handler, delete_testimonial_handler, get_all_testimonials_handler,
    get_testimonials_handler, submit_testimonial_handler, update_testimonial_handler,
};

pub fn configure_testimonial_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/testimonials", web::get().to(get_testimonials_handler))
        .route("/testimonials", web::post().to(submit_testimonial_handler))
        .route(
            "/testimonials/all",
            web::get().to(get_all_testimonials_handler),
        )
        .route(
            "/testimonials/admin",
            web::post().to(create_testimonial_handler),
        )
        .route(
            "/testimonials/{id}",
            web::put().to(update_testimonial_handler),
        )
        .route(
            "/testimonials/{id}",
            web::delete().to(delete_testimonial_handler),
        );
}
