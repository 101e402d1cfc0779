#![allow(dead_code)]
//! In-process stand-in for the customer directory.
//!
//! Mirrors the directory's contract: `422` with a `message` on duplicate
//! emails, `404` with an `error` on unknown ids, `204` on delete.

use std::net::TcpListener;
use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: Value,
}

#[derive(Default)]
struct FakeState {
    customers: Vec<Record>,
    next_id: i32,
    fail_next: Option<(u16, String)>,
    requests: Vec<String>,
}

type SharedState = web::Data<Mutex<FakeState>>;

pub struct FakeDirectory {
    pub base_url: String,
    state: SharedState,
    handle: ServerHandle,
}

fn failure(status: u16, body: String) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(status).unwrap();
    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": "Not found"}))
}

/// Records the request and returns a scripted failure, if one is queued.
fn intercept(state: &SharedState, req: &HttpRequest) -> Option<HttpResponse> {
    let mut state = state.lock().unwrap();
    state
        .requests
        .push(format!("{} {}", req.method(), req.path()));
    state
        .fail_next
        .take()
        .map(|(status, body)| failure(status, body))
}

async fn list(req: HttpRequest, state: SharedState) -> HttpResponse {
    if let Some(response) = intercept(&state, &req) {
        return response;
    }
    let state = state.lock().unwrap();
    HttpResponse::Ok().json(&state.customers)
}

async fn create(req: HttpRequest, state: SharedState, body: web::Json<Value>) -> HttpResponse {
    if let Some(response) = intercept(&state, &req) {
        return response;
    }
    let mut state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.customers.iter().any(|c| c.email == email) {
        return HttpResponse::UnprocessableEntity().json(json!({"message": "Email must be unique"}));
    }
    state.next_id += 1;
    let record = Record {
        id: state.next_id,
        name: body["name"].as_str().unwrap_or_default().to_string(),
        email,
        age: body["age"].clone(),
    };
    state.customers.push(record.clone());
    HttpResponse::Created().json(record)
}

async fn update(
    req: HttpRequest,
    state: SharedState,
    id: web::Path<i32>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(response) = intercept(&state, &req) {
        return response;
    }
    let id = id.into_inner();
    let mut state = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state
        .customers
        .iter()
        .any(|c| c.id != id && c.email == email)
    {
        return HttpResponse::UnprocessableEntity().json(json!({"message": "Email already in use"}));
    }
    let Some(record) = state.customers.iter_mut().find(|c| c.id == id) else {
        return not_found();
    };
    record.name = body["name"].as_str().unwrap_or_default().to_string();
    record.email = email;
    record.age = body["age"].clone();
    let record = record.clone();
    HttpResponse::Ok().json(record)
}

async fn delete(req: HttpRequest, state: SharedState, id: web::Path<i32>) -> HttpResponse {
    if let Some(response) = intercept(&state, &req) {
        return response;
    }
    let id = id.into_inner();
    let mut state = state.lock().unwrap();
    let before = state.customers.len();
    state.customers.retain(|c| c.id != id);
    if state.customers.len() == before {
        return not_found();
    }
    HttpResponse::NoContent().finish()
}

impl FakeDirectory {
    /// Binds an ephemeral port and serves the fake until dropped or stopped.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let state: SharedState = web::Data::new(Mutex::new(FakeState::default()));

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/customers", web::get().to(list))
                .route("/customers", web::post().to(create))
                .route("/customers/{id}", web::patch().to(update))
                .route("/customers/{id}", web::delete().to(delete))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .unwrap()
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            state,
            handle,
        }
    }

    pub fn seed(&self, name: &str, email: &str, age: i64) -> i32 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.customers.push(Record {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age: json!(age),
        });
        id
    }

    /// Makes the next request fail with `status` and the raw `body`.
    pub fn fail_next(&self, status: u16, body: &str) {
        self.state.lock().unwrap().fail_next = Some((status, body.to_string()));
    }

    pub fn customers(&self) -> Vec<Record> {
        self.state.lock().unwrap().customers.clone()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
