mod dining_halls;
mod dishes;
pub mod errors;
mod stations;

use crate::db::{DiningHallOperations, DishOperations, StationOperations};
use crate::AppState;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use dining_halls::*;
use dishes::*;
use errors::bad_request_handler;
use stations::*;
use utoipa::OpenApi;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub const DOCS_PATH: &str = "/apidocs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dish Management Service",
        version = "0.0.1",
        description = "Manage dining halls, their stations and the dishes served at them"
    ),
    tags(
        (name = "Dining Halls", description = "Dining halls and their stations"),
        (name = "Stations", description = "Stations across all dining halls"),
        (name = "Dishes", description = "Dishes served at a station")
    )
)]
pub struct ApiDoc;

async fn redirect_to_docs() -> impl Responder {
    HttpResponse::Found()
        .insert_header((header::LOCATION, DOCS_PATH))
        .finish()
}

async fn openapi_document(doc: web::Data<utoipa::openapi::OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(doc.get_ref())
}

/// Extractor error handlers and the landing redirects. Registered on the
/// plain `App` before any API scope.
pub fn configure_root(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(bad_request_handler::<JsonPayloadError>),
    )
    .app_data(
        web::QueryConfig::default().error_handler(bad_request_handler::<QueryPayloadError>),
    )
    .app_data(web::PathConfig::default().error_handler(bad_request_handler::<PathError>))
    .service(
        web::resource(vec!["/", "/api/v1", "/api/v1/"]).route(web::get().to(redirect_to_docs)),
    );
}

/// Serves the collected OpenAPI document.
pub fn docs_service(doc: utoipa::openapi::OpenApi) -> actix_web::Resource {
    web::resource(DOCS_PATH)
        .app_data(web::Data::new(doc))
        .route(web::get().to(openapi_document))
}

fn dining_hall_config(
    cfg: &mut ServiceConfig,
    hall_ops: &DiningHallOperations,
    station_ops: &StationOperations,
) {
    cfg.service(
        scope::scope("/api/v1/dining_halls")
            .app_data(web::Data::new(hall_ops.clone()))
            .app_data(web::Data::new(station_ops.clone()))
            .service(create_dining_hall)
            .service(get_dining_halls)
            .service(get_dining_hall)
            .service(update_dining_hall)
            .service(delete_dining_hall)
            .service(create_hall_station)
            .service(get_hall_stations)
            .service(get_hall_station)
            .service(update_hall_station)
            .service(delete_hall_station),
    );
}

fn station_config(cfg: &mut ServiceConfig, station_ops: &StationOperations) {
    cfg.service(
        scope::scope("/api/v1/stations")
            .app_data(web::Data::new(station_ops.clone()))
            .service(create_station)
            .service(get_stations)
            .service(get_station)
            .service(update_station)
            .service(delete_station),
    );
}

fn dish_config(cfg: &mut ServiceConfig, dish_ops: &DishOperations) {
    cfg.service(
        scope::scope("/api/v1/dishes")
            .app_data(web::Data::new(dish_ops.clone()))
            .service(create_dish)
            .service(get_dishes)
            .service(get_dish)
            .service(update_dish)
            .service(delete_dish),
    );
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    dining_hall_config(cfg, &state.dining_hall_ops, &state.station_ops);
    station_config(cfg, &state.station_ops);
    dish_config(cfg, &state.dish_ops);
}
