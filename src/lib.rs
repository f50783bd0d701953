#[macro_use]
extern crate log;

pub mod api;
pub mod config;
pub mod db;
pub mod enums;
pub mod middleware;
pub mod models;
pub mod test_utils;
pub mod traits;

use crate::config::AppConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, DiningHallOperations, DishOperations,
    RepositoryError, StationOperations,
};
use crate::middleware::RequestLogging;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::App;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use utoipa::OpenApi;
use utoipa_actix_web::AppExt;

#[derive(Clone)]
pub struct AppState {
    pub dining_hall_ops: DiningHallOperations,
    pub station_ops: StationOperations,
    pub dish_ops: DishOperations,
}

impl AppState {
    /// Opens the pool, applies pending migrations and wires the access layer.
    pub fn new(config: &AppConfig) -> Result<Self, RepositoryError> {
        let pool = establish_connection_pool(&config.database.url, config.database.pool_size)?;
        run_db_migrations(pool.clone())?;
        Ok(Self::from_pool(pool, Some(config.dish_list_limit)))
    }

    pub fn from_pool(
        pool: Pool<ConnectionManager<PgConnection>>,
        dish_list_limit: Option<i64>,
    ) -> Self {
        AppState {
            dining_hall_ops: DiningHallOperations::new(pool.clone()),
            station_ops: StationOperations::new(pool.clone()),
            dish_ops: DishOperations::new(pool, dish_list_limit),
        }
    }
}

/// The full HTTP application: landing redirects, the API scopes, the OpenAPI
/// document and request logging.
pub fn build_app(
    state: &AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .configure(api::configure_root)
        .into_utoipa_app()
        .openapi(api::ApiDoc::openapi())
        .configure(|cfg| api::configure(cfg, state))
        .openapi_service(api::docs_service)
        .into_app()
        .wrap(RequestLogging)
}
