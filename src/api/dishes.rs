use crate::api::errors::error_response;
use crate::db::DishOperations;
use crate::enums::requests::{DishFilter, DishPayload};
use crate::enums::responses::ErrorResponse;
use crate::models::dish::{Dish, UpdateDish};
use crate::traits::HyperLinked;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{debug, error, info};

#[utoipa::path(
    tag = "Dishes",
    request_body = DishPayload,
    responses(
        (status = 201, description = "Dish created", body = Dish),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Dish with the same name already exists for this dining hall and station", body = ErrorResponse)
    ),
    summary = "Create a new dish"
)]
#[post("")]
pub(super) async fn create_dish(
    dish_ops: web::Data<DishOperations>,
    req_data: web::Json<DishPayload>,
) -> actix_web::Result<impl Responder> {
    let payload = req_data.into_inner();
    let result = web::block(move || dish_ops.create_dish(payload)).await?;

    match result {
        Ok(dish) => {
            info!(
                "create_dish: created dish {} '{}' at station {}",
                dish.id, dish.name, dish.station_id
            );
            Ok(HttpResponse::Created().json(dish.into_resource_with_message("Dish created")))
        }
        Err(e) => {
            error!("create_dish: failed to create dish: {}", e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dishes",
    params(DishFilter),
    responses(
        (status = 200, description = "A list of dishes", body = [Dish]),
        (status = 400, description = "Invalid filter", body = ErrorResponse)
    ),
    summary = "Retrieve a list of all dishes"
)]
#[get("")]
pub(super) async fn get_dishes(
    dish_ops: web::Data<DishOperations>,
    query: web::Query<DishFilter>,
) -> actix_web::Result<impl Responder> {
    let filter = query.into_inner();
    let result = web::block(move || dish_ops.list_dishes(&filter)).await?;

    match result {
        Ok(dishes) => {
            debug!("get_dishes: fetched {} dishes", dishes.len());
            let body: Vec<_> = dishes.into_iter().map(HyperLinked::into_resource).collect();
            Ok(HttpResponse::Ok().json(body))
        }
        Err(e) => {
            error!("get_dishes: failed to retrieve dishes: {}", e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dishes",
    params(
        ("id", description = "ID of the dish"),
    ),
    responses(
        (status = 200, description = "A dish", body = Dish),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    summary = "Retrieve detailed information about a specific dish"
)]
#[get("/{id}")]
pub(super) async fn get_dish(
    dish_ops: web::Data<DishOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let dish_id = path.into_inner().0;
    let result = web::block(move || dish_ops.get_dish(dish_id)).await?;

    match result {
        Ok(dish) => Ok(HttpResponse::Ok().json(dish.into_resource())),
        Err(e) => {
            debug!("get_dish: lookup of {} failed: {}", dish_id, e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dishes",
    params(
        ("id", description = "ID of the dish"),
    ),
    request_body = UpdateDish,
    responses(
        (status = 200, description = "Dish updated", body = Dish),
        (status = 400, description = "Nothing to update or invalid references", body = ErrorResponse),
        (status = 404, description = "Dish not found", body = ErrorResponse),
        (status = 409, description = "An equivalent dish already exists", body = ErrorResponse)
    ),
    summary = "Update details of an existing dish"
)]
#[put("/{id}")]
pub(super) async fn update_dish(
    dish_ops: web::Data<DishOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateDish>,
) -> actix_web::Result<impl Responder> {
    let dish_id = path.into_inner().0;
    let changes = req_data.into_inner();
    let result = web::block({
        let changes = changes.clone();
        move || dish_ops.update_dish(dish_id, changes)
    })
    .await?;

    match result {
        Ok(dish) => {
            info!("update_dish: dish {} updated. Changes: {:?}", dish.id, changes);
            Ok(HttpResponse::Ok().json(dish.into_resource_with_message("Dish updated")))
        }
        Err(e) => {
            error!("update_dish: failed to update dish {}: {}", dish_id, e);
            Ok(error_response(&e))
        }
    }
}

#[utoipa::path(
    tag = "Dishes",
    params(
        ("id", description = "ID of the dish"),
    ),
    responses(
        (status = 200, description = "Dish deleted"),
        (status = 404, description = "Dish not found", body = ErrorResponse)
    ),
    summary = "Delete a dish"
)]
#[delete("/{id}")]
pub(super) async fn delete_dish(
    dish_ops: web::Data<DishOperations>,
    path: web::Path<(i32,)>,
) -> actix_web::Result<impl Responder> {
    let dish_id = path.into_inner().0;
    let result = web::block(move || dish_ops.delete_dish(dish_id)).await?;

    match result {
        Ok(dish) => {
            info!("delete_dish: removed dish {} '{}'", dish.id, dish.name);
            Ok(HttpResponse::Ok().json(dish.into_confirmation("Dish deleted")))
        }
        Err(e) => {
            error!("delete_dish: failed to delete dish {}: {}", dish_id, e);
            Ok(error_response(&e))
        }
    }
}
