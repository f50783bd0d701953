#[macro_use]
extern crate log;

use std::io;

use actix_web::HttpServer;
use campus_dishes::config::AppConfig;
use campus_dishes::{build_app, AppState};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Failed to load .env file: {}", e);
    }

    // Setup logging
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pretty_env_logger::formatted_timed_builder()
        .parse_filters(&filters)
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    info!("Initializing database connection pool...");
    let state = AppState::new(&config).map_err(|e| {
        error!("Failed to prepare the database: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    let host = config.server.host.clone();
    let port = config.server.port;
    info!("Starting server at http://{}:{}", host, port);

    HttpServer::new(move || build_app(&state))
        .bind((host, port))?
        .run()
        .await
}
