use crate::api::errors::error_response;
use crate::db::{RepositoryError, StationOperations};
use crate::enums::requests::{StationFilter, StationPayload};
use crate::enums::responses::ErrorResponse;
use crate::models::station::{Station, UpdateStation};
use crate::traits::HyperLinked;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{debug, error, info};

fn station_created(result: Result<Station, RepositoryError>, op: &str) -> HttpResponse {
    match result {
        Ok(station) => {
            info!(
                "{}: created station {} '{}' in dining hall {}",
                op, station.id, station.name, station.dining_hall_id
            );
            HttpResponse::Created().json(station.into_resource_with_message("Station added"))
        }
        Err(e) => {
            error!("{}: failed to create station: {}", op, e);
            error_response(&e)
        }
    }
}

fn station_list(result: Result<Vec<Station>, RepositoryError>, op: &str) -> HttpResponse {
    match result {
        Ok(stations) => {
            debug!("{}: fetched {} stations", op, stations.len());
            let body: Vec<_> = stations.into_iter().map(HyperLinked::into_resource).collect();
            HttpResponse::Ok().json(body)
        }
        Err(e) => {
            error!("{}: failed to retrieve stations: {}", op, e);
            error_response(&e)
        }
    }
}

fn station_found(result: Result<Station, RepositoryError>, op: &str) -> HttpResponse {
    match result {
        Ok(station) => HttpResponse::Ok().json(station.into_resource()),
        Err(e) => {
            debug!("{}: lookup failed: {}", op, e);
            error_response(&e)
        }
    }
}

fn station_updated(result: Result<Station, RepositoryError>, op: &str) -> HttpResponse {
    match result {
        Ok(station) => {
            info!("{}: station {} is now '{}'", op, station.id, station.name);
            HttpResponse::Ok().json(station.into_resource_with_message("Station updated"))
        }
        Err(e) => {
            error!("{}: failed to update station: {}", op, e);
            error_response(&e)
        }
    }
}

fn station_deleted(result: Result<Station, RepositoryError>, op: &str) -> HttpResponse {
    match result {
        Ok(station) => {
            info!("{}: removed station {} '{}'", op, station.id, station.name);
            HttpResponse::Ok().json(station.into_confirmation("Station deleted"))
        }
        Err(e) => {
            error!("{}: failed to delete station: {}", op, e);
            error_response(&e)
        }
    }
}

// ---------- NESTED UNDER /dining_halls/{id} ---------- //

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
    ),
    request_body = StationPayload,
    responses(
        (status = 201, description = "Station created successfully", body = Station),
        (status = 400, description = "Name is required", body = ErrorResponse),
        (status = 404, description = "Dining hall not found", body = ErrorResponse),
        (status = 409, description = "Station with the same name already exists for this dining hall", body = ErrorResponse)
    ),
    summary = "Add a new station to a specific dining hall"
)]
#[post("/{id}/stations")]
pub(super) async fn create_hall_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<StationPayload>,
) -> actix_web::Result<impl Responder> {
    let hall_id = path.into_inner().0;
    let payload = req_data.into_inner();
    let result = web::block(move || station_ops.create_hall_station(hall_id, payload)).await?;
    Ok(station_created(result, "create_hall_station"))
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
        StationFilter,
    ),
    responses(
        (status = 200, description = "A list of stations within the specified dining hall", body = [Station]),
        (status = 404, description = "Dining hall not found", body = ErrorResponse)
    ),
    summary = "Retrieve all stations within a specific dining hall"
)]
#[get("/{id}/stations")]
pub(super) async fn get_hall_stations(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32,)>,
    query: web::Query<StationFilter>,
) -> actix_web::Result<impl Responder> {
    let hall_id = path.into_inner().0;
    let filter = query.into_inner();
    let result = web::block(move || station_ops.list_hall_stations(hall_id, &filter)).await?;
    Ok(station_list(result, "get_hall_stations"))
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
        ("station_id", description = "ID of the station"),
    ),
    responses(
        (status = 200, description = "A station", body = Station),
        (status = 404, description = "Station not found in this dining hall", body = ErrorResponse)
    ),
    summary = "Retrieve a station of a specific dining hall"
)]
#[get("/{id}/stations/{station_id}")]
pub(super) async fn get_hall_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32, i32)>,
) -> actix_web::Result<impl Responder> {
    let (hall_id, station_id) = path.into_inner();
    let result = web::block(move || station_ops.get_hall_station(hall_id, station_id)).await?;
    Ok(station_found(result, "get_hall_station"))
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
        ("station_id", description = "ID of the station"),
    ),
    request_body = UpdateStation,
    responses(
        (status = 200, description = "Station updated", body = Station),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 404, description = "Station not found in this dining hall", body = ErrorResponse),
        (status = 409, description = "Name already in use in this dining hall", body = ErrorResponse)
    ),
    summary = "Rename a station of a specific dining hall"
)]
#[put("/{id}/stations/{station_id}")]
pub(super) async fn update_hall_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32, i32)>,
    req_data: web::Json<UpdateStation>,
) -> actix_web::Result<impl Responder> {
    let (hall_id, station_id) = path.into_inner();
    let changes = req_data.into_inner();
    let result =
        web::block(move || station_ops.update_hall_station(hall_id, station_id, changes)).await?;
    Ok(station_updated(result, "update_hall_station"))
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
        ("station_id", description = "ID of the station"),
    ),
    responses(
        (status = 200, description = "Station deleted"),
        (status = 404, description = "Station not found in this dining hall", body = ErrorResponse),
        (status = 409, description = "Station still has dishes", body = ErrorResponse)
    ),
    summary = "Delete a station of a specific dining hall"
)]
#[delete("/{id}/stations/{station_id}")]
pub(super) async fn delete_hall_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32, i32)>,
) -> actix_web::Result<impl Responder> {
    let (hall_id, station_id) = path.into_inner();
    let result = web::block(move || station_ops.delete_hall_station(hall_id, station_id)).await?;
    Ok(station_deleted(result, "delete_hall_station"))
}

// ---------- /stations ---------- //

#[utoipa::path(
    tag = "Stations",
    request_body = StationPayload,
    responses(
        (status = 201, description = "Station created", body = Station),
        (status = 400, description = "Invalid input or dining hall not found", body = ErrorResponse),
        (status = 409, description = "Station with the same name already exists for this dining hall", body = ErrorResponse)
    ),
    summary = "Create a new station"
)]
#[post("")]
pub(super) async fn create_station(
    station_ops: web::Data<StationOperations>,
    req_data: web::Json<StationPayload>,
) -> actix_web::Result<impl Responder> {
    let payload = req_data.into_inner();
    let result = web::block(move || station_ops.create_station(payload)).await?;
    Ok(station_created(result, "create_station"))
}

#[utoipa::path(
    tag = "Stations",
    params(StationFilter),
    responses(
        (status = 200, description = "A list of stations", body = [Station]),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    summary = "Retrieve a list of stations"
)]
#[get("")]
pub(super) async fn get_stations(
    station_ops: web::Data<StationOperations>,
    query: web::Query<StationFilter>,
) -> actix_web::Result<impl Responder> {
    let filter = query.into_inner();
    let result = web::block(move || station_ops.list_stations(&filter)).await?;
    Ok(station_list(result, "get_stations"))
}

#[utoipa::path(
    tag = "Stations",
    params(
        ("id", description = "ID of the station"),
    ),
    responses(
        (status = 200, description = "A station", body = Station),
        (status = 404, description = "Station not found", body = ErrorResponse)
    ),
    summary = "Retrieve detailed information about a specific station"
)]
#[get("/{id}")]
pub(super) async fn get_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let station_id = path.into_inner().0;
    let result = web::block(move || station_ops.get_station(station_id)).await?;
    Ok(station_found(result, "get_station"))
}

#[utoipa::path(
    tag = "Stations",
    params(
        ("id", description = "ID of the station"),
    ),
    request_body = UpdateStation,
    responses(
        (status = 200, description = "Station updated", body = Station),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 404, description = "Station not found", body = ErrorResponse),
        (status = 409, description = "Name already in use in this dining hall", body = ErrorResponse)
    ),
    summary = "Rename a station"
)]
#[put("/{id}")]
pub(super) async fn update_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateStation>,
) -> actix_web::Result<impl Responder> {
    let station_id = path.into_inner().0;
    let changes = req_data.into_inner();
    let result = web::block(move || station_ops.update_station(station_id, changes)).await?;
    Ok(station_updated(result, "update_station"))
}

#[utoipa::path(
    tag = "Stations",
    params(
        ("id", description = "ID of the station"),
    ),
    responses(
        (status = 200, description = "Station deleted"),
        (status = 404, description = "Station not found", body = ErrorResponse),
        (status = 409, description = "Station still has dishes", body = ErrorResponse)
    ),
    summary = "Delete a station"
)]
#[delete("/{id}")]
pub(super) async fn delete_station(
    station_ops: web::Data<StationOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let station_id = path.into_inner().0;
    let result = web::block(move || station_ops.delete_station(station_id)).await?;
    Ok(station_deleted(result, "delete_station"))
}
