use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use tera::Tera;
use tokio::sync::Mutex;

use crate::directory::HttpDirectory;
use crate::models::config::ServerConfig;
use crate::services::customer_desk::CustomerDesk;

pub mod directory;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let directory = HttpDirectory::new(server_config.directory_url.as_str());
    log::info!("Using customer directory at {}", directory.base_url());

    // The desk is mounted once and shared by every worker.
    let desk = CustomerDesk::mount(Arc::new(directory)).await;
    let desk = web::Data::new(Mutex::new(desk));

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(desk.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
