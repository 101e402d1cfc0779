//! HTTP handlers of the desk.

use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web::web;
use tera::{Context, Tera};

pub mod api;
pub mod customers;

/// Registers the HTML routes of the desk.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(customers::show_desk)
        .service(customers::submit_customer)
        .service(customers::cancel_edit)
        .service(customers::edit_customer)
        .service(customers::confirm_delete)
        .service(customers::delete_customer)
        .service(web::scope("/api").service(api::api_v1_customers));
}

/// Renders `template` or answers `500` when rendering fails.
pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// `303 See Other` to `location`, so a refreshed page does not re-post.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
