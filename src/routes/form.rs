use actix_web::web;

use crate::handlers::form::{
    delete_form_handler, list_forms_handler, mark_form_handled_handler, submit_form_handler,
};

pub fn configure_form_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/forms", web::post().to(submit_form_handler))
        .route("/forms", web::get().to(list_forms_handler))
        .route(
            "/forms/{id}/handled",
            web::put().to(mark_form_handled_handler),
        )
        .route("/forms/{id}", web::delete().to(delete_form_handler));
}
