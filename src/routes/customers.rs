use actix_web::{HttpResponse, Responder, get, post, web};
use tera::{Context, Tera};

use crate::domain::types::CustomerId;
use crate::forms::customer::SubmitCustomerForm;
use crate::forms::delete::DeleteCustomerForm;
use crate::routes::{redirect, render_template};
use crate::services::customer_desk::SharedDesk;

fn parse_customer_id(raw: i32) -> Result<CustomerId, HttpResponse> {
    CustomerId::new(raw).map_err(|err| {
        log::warn!("Rejected customer id {raw}: {err}");
        redirect("/")
    })
}

#[get("/")]
pub async fn show_desk(desk: web::Data<SharedDesk>, tera: web::Data<Tera>) -> impl Responder {
    let page = desk.lock().await.page_data();

    let mut context = Context::new();
    context.insert("page", &page);

    render_template(&tera, "customers/index.html", &context)
}

#[post("/customers/submit")]
pub async fn submit_customer(
    desk: web::Data<SharedDesk>,
    web::Form(form): web::Form<SubmitCustomerForm>,
) -> impl Responder {
    let (form, revision) = form.into_parts();
    let outcome = desk.lock().await.submit_posted(form, revision).await;
    log::debug!("Submit finished with {outcome:?}");

    redirect("/")
}

#[post("/customers/cancel")]
pub async fn cancel_edit(desk: web::Data<SharedDesk>) -> impl Responder {
    desk.lock().await.cancel();
    redirect("/")
}

#[post("/customers/{customer_id}/edit")]
pub async fn edit_customer(
    customer_id: web::Path<i32>,
    desk: web::Data<SharedDesk>,
) -> impl Responder {
    let customer_id = match parse_customer_id(customer_id.into_inner()) {
        Ok(customer_id) => customer_id,
        Err(response) => return response,
    };

    if let Err(err) = desk.lock().await.edit(customer_id) {
        log::warn!("Cannot edit customer {customer_id}: {err}");
    }

    redirect("/")
}

#[get("/customers/{customer_id}/delete")]
pub async fn confirm_delete(
    customer_id: web::Path<i32>,
    desk: web::Data<SharedDesk>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let customer_id = match parse_customer_id(customer_id.into_inner()) {
        Ok(customer_id) => customer_id,
        Err(response) => return response,
    };

    let data = match desk.lock().await.delete_confirmation(customer_id) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Cannot confirm deletion of customer {customer_id}: {err}");
            return redirect("/");
        }
    };

    let mut context = Context::new();
    context.insert("confirmation", &data);

    render_template(&tera, "customers/confirm_delete.html", &context)
}

#[post("/customers/{customer_id}/delete")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    desk: web::Data<SharedDesk>,
    web::Form(form): web::Form<DeleteCustomerForm>,
) -> impl Responder {
    let customer_id = match parse_customer_id(customer_id.into_inner()) {
        Ok(customer_id) => customer_id,
        Err(response) => return response,
    };

    let outcome = desk.lock().await.delete(customer_id, &form).await;
    log::debug!("Delete of customer {customer_id} finished with {outcome:?}");

    redirect("/")
}
