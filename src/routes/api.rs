use actix_web::{HttpResponse, Responder, get, web};

use crate::services::customer_desk::SharedDesk;

/// Cached customer snapshot as JSON.
#[get("/v1/customers")]
pub async fn api_v1_customers(desk: web::Data<SharedDesk>) -> impl Responder {
    let customers = desk.lock().await.customers().to_vec();
    HttpResponse::Ok().json(customers)
}
