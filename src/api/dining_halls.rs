use crate::api::errors::error_response;
use crate::db::DiningHallOperations;
use crate::enums::requests::{DiningHallFilter, DiningHallPayload};
use crate::enums::responses::ErrorResponse;
use crate::models::dining_hall::{DiningHall, UpdateDiningHall};
use crate::traits::HyperLinked;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{debug, error, info};

#[utoipa::path(
    tag = "Dining Halls",
    request_body = DiningHallPayload,
    responses(
        (status = 201, description = "Dining hall added", body = DiningHall),
        (status = 400, description = "Name is required", body = ErrorResponse),
        (status = 409, description = "Dining hall with the same name already exists", body = ErrorResponse)
    ),
    summary = "Add a new dining hall"
)]
#[post("")]
pub(super) async fn create_dining_hall(
    hall_ops: web::Data<DiningHallOperations>,
    req_data: web::Json<DiningHallPayload>,
) -> actix_web::Result<impl Responder> {
    let payload = req_data.into_inner();
    let result = web::block(move || hall_ops.create_dining_hall(payload)).await?;

    match result {
        Ok(hall) => {
            info!(
                "create_dining_hall: created dining hall {} '{}'",
                hall.id, hall.name
            );
            Ok(HttpResponse::Created().json(hall.into_resource_with_message("Dining hall added")))
        }
        Err(e) => {
            error!("create_dining_hall: failed to create dining hall: {}", e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dining Halls",
    params(DiningHallFilter),
    responses(
        (status = 200, description = "A list of dining halls", body = [DiningHall]),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    summary = "Retrieve a list of all dining halls"
)]
#[get("")]
pub(super) async fn get_dining_halls(
    hall_ops: web::Data<DiningHallOperations>,
    query: web::Query<DiningHallFilter>,
) -> actix_web::Result<impl Responder> {
    let filter = query.into_inner();
    let result = web::block(move || hall_ops.list_dining_halls(&filter)).await?;

    match result {
        Ok(halls) => {
            debug!("get_dining_halls: fetched {} dining halls", halls.len());
            let body: Vec<_> = halls.into_iter().map(HyperLinked::into_resource).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            error!("get_dining_halls: failed to retrieve dining halls: {}", e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
    ),
    responses(
        (status = 200, description = "A dining hall", body = DiningHall),
        (status = 404, description = "Dining hall not found", body = ErrorResponse)
    ),
    summary = "Retrieve a specific dining hall"
)]
#[get("/{id}")]
pub(super) async fn get_dining_hall(
    hall_ops: web::Data<DiningHallOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let hall_id = path.into_inner().0;
    let result = web::block(move || hall_ops.get_dining_hall(hall_id)).await?;

    match result {
        Ok(hall) => Ok(HttpResponse::Ok().json(hall.into_resource())),
        Err(e) => {
            debug!("get_dining_hall: lookup of {} failed: {}", hall_id, e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
    ),
    request_body = UpdateDiningHall,
    responses(
        (status = 200, description = "Dining hall updated", body = DiningHall),
        (status = 400, description = "Nothing to update", body = ErrorResponse),
        (status = 404, description = "Dining hall not found", body = ErrorResponse),
        (status = 409, description = "Name already in use", body = ErrorResponse)
    ),
    summary = "Rename a dining hall"
)]
#[put("/{id}")]
pub(super) async fn update_dining_hall(
    hall_ops: web::Data<DiningHallOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateDiningHall>,
) -> actix_web::Result<impl Responder> {
    let hall_id = path.into_inner().0;
    let changes = req_data.into_inner();
    let result = web::block(move || hall_ops.update_dining_hall(hall_id, changes)).await?;

    match result {
        Ok(hall) => {
            info!("update_dining_hall: dining hall {} is now '{}'", hall.id, hall.name);
            Ok(HttpResponse::Ok().json(hall.into_resource_with_message("Dining hall updated")))
        }
        Err(e) => {
            error!("update_dining_hall: failed to update dining hall {}: {}", hall_id, e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dining Halls",
    params(
        ("id", description = "ID of the dining hall"),
    ),
    responses(
        (status = 200, description = "Dining hall deleted"),
        (status = 404, description = "Dining hall not found", body = ErrorResponse),
        (status = 409, description = "Dining hall still has stations or dishes", body = ErrorResponse)
    ),
    summary = "Delete a dining hall"
)]
#[delete("/{id}")]
pub(super) async fn delete_dining_hall(
    hall_ops: web::Data<DiningHallOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let hall_id = path.into_inner().0;
    let result = web::block(move || hall_ops.delete_dining_hall(hall_id)).await?;

    match result {
        Ok(hall) => {
            info!("delete_dining_hall: removed dining hall {} '{}'", hall.id, hall.name);
            Ok(HttpResponse::Ok().json(hall.into_confirmation("Dining hall deleted")))
        }
        Err(e) => {
            error!("delete_dining_hall: failed to delete dining hall {}: {}", hall_id, e);
            Ok(error_response(&e))
        }
    }
}
