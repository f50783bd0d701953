use crate::db::errors::RepositoryError;
use crate::db::schema::dishes::dsl::*;
use crate::db::{
    checked_name, contains_pattern, non_blank, required_text, resolve_limit, storable_text,
    DbConnection,
};
use crate::enums::requests::{DishFilter, DishPayload};
use crate::models::dish::{Dish, NewDish, UpdateDish};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

const DUPLICATE_DISH: &str =
    "Dish with the same name already exists for this dining hall and station";
const INVALID_HALL: &str = "Invalid dining_hall_id";
const INVALID_STATION: &str = "Invalid station_id for this dining hall";

#[derive(Clone)]
pub struct DishOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
    default_limit: Option<i64>,
}

/// Checks that the dining hall exists and that the station belongs to it.
fn check_placement(conn: &mut PgConnection, hall_id: i32, station: i32) -> Result<(), RepositoryError> {
    use crate::db::schema::{dining_halls, stations};

    let hall = dining_halls::table
        .find(hall_id)
        .select(dining_halls::id)
        .first::<i32>(conn)
        .optional()?;
    if hall.is_none() {
        return Err(RepositoryError::InvalidReference(INVALID_HALL.to_string()));
    }

    let owner = stations::table
        .find(station)
        .select(stations::dining_hall_id)
        .first::<i32>(conn)
        .optional()?;
    match owner {
        Some(owner) if owner == hall_id => Ok(()),
        _ => Err(RepositoryError::InvalidReference(INVALID_STATION.to_string())),
    }
}

fn check_unique(
    conn: &mut PgConnection,
    dish_name: &str,
    hall_id: i32,
    station: i32,
    except: Option<i32>,
) -> Result<(), RepositoryError> {
    let mut query = dishes
        .filter(name.eq(dish_name))
        .filter(dining_hall_id.eq(hall_id))
        .filter(station_id.eq(station))
        .select(id)
        .into_boxed();
    if let Some(except) = except {
        query = query.filter(id.ne(except));
    }
    match query.first::<i32>(conn).optional()? {
        Some(_) => Err(RepositoryError::Conflict(DUPLICATE_DISH.to_string())),
        None => Ok(()),
    }
}

impl DishOperations {
    /// `default_limit` caps list results when the caller gives no limit.
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>, default_limit: Option<i64>) -> Self {
        Self {
            pool,
            default_limit,
        }
    }

    fn connection(&self, op: &str) -> Result<DbConnection<'_>, RepositoryError> {
        DbConnection::new(&self.pool).map_err(|e| {
            error!("{}: failed to acquire DB connection: {}", op, e);
            e
        })
    }

    pub fn create_dish(&self, payload: DishPayload) -> Result<Dish, RepositoryError> {
        let (dish_name, hall_id, station) = match (
            non_blank(payload.name.as_deref()),
            payload.dining_hall_id,
            payload.station_id,
        ) {
            (Some(n), Some(hall), Some(station)) => (checked_name(n)?, hall, station),
            _ => {
                return Err(RepositoryError::ValidationError(
                    "name, dining_hall_id and station_id are required".to_string(),
                ))
            }
        };
        if let Some(text) = payload.description.as_deref() {
            storable_text(text, "Description")?;
        }

        let mut conn = self.connection("create_dish")?;
        conn.connection().transaction(|conn| {
            check_placement(conn, hall_id, station)?;
            check_unique(conn, &dish_name, hall_id, station, None)?;

            diesel::insert_into(dishes)
                .values(&NewDish {
                    name: dish_name.clone(),
                    description: payload.description.clone(),
                    dining_hall_id: hall_id,
                    station_id: station,
                })
                .get_result::<Dish>(conn)
                .map_err(|e| {
                    error!("create_dish: error inserting dish '{}': {}", dish_name, e);
                    RepositoryError::on_write(e, DUPLICATE_DISH, INVALID_STATION)
                })
        })
    }

    pub fn list_dishes(&self, filter: &DishFilter) -> Result<Vec<Dish>, RepositoryError> {
        let row_limit = resolve_limit(filter.limit, self.default_limit)?;
        let mut conn = self.connection("list_dishes")?;

        let mut query = dishes.into_boxed();
        if let Some(needle) = non_blank(filter.name.as_deref()) {
            query = query.filter(name.ilike(contains_pattern(needle)));
        }
        if let Some(needle) = non_blank(filter.description.as_deref()) {
            query = query.filter(description.ilike(contains_pattern(needle)));
        }
        if let Some(hall_id) = filter.dining_hall_id {
            query = query.filter(dining_hall_id.eq(hall_id));
        }
        if let Some(station) = filter.station_id {
            query = query.filter(station_id.eq(station));
        }
        if let Some(row_limit) = row_limit {
            query = query.limit(row_limit);
        }

        query
            .order(id.asc())
            .load::<Dish>(conn.connection())
            .map_err(|e| {
                error!("list_dishes: error fetching dishes with {:?}: {}", filter, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_dish(&self, dish_id: i32) -> Result<Dish, RepositoryError> {
        let mut conn = self.connection("get_dish")?;

        dishes
            .find(dish_id)
            .first::<Dish>(conn.connection())
            .map_err(|e| RepositoryError::on_lookup(e, "Dish"))
    }

    /// Applies a partial update. The merged row must still satisfy the
    /// placement and uniqueness rules that apply on create.
    pub fn update_dish(&self, dish_id: i32, mut changes: UpdateDish) -> Result<Dish, RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No fields to update".to_string(),
            ));
        }
        if changes.name.is_some() {
            changes.name = Some(required_text(
                changes.name.as_deref(),
                "Name must not be empty",
            )?);
        }
        if let Some(Some(text)) = &changes.description {
            storable_text(text, "Description")?;
        }

        let mut conn = self.connection("update_dish")?;
        conn.connection().transaction(|conn| {
            let current = dishes
                .find(dish_id)
                .first::<Dish>(conn)
                .map_err(|e| RepositoryError::on_lookup(e, "Dish"))?;

            let merged_hall = changes.dining_hall_id.unwrap_or(current.dining_hall_id);
            let merged_station = changes.station_id.unwrap_or(current.station_id);
            if changes.dining_hall_id.is_some() || changes.station_id.is_some() {
                check_placement(conn, merged_hall, merged_station)?;
            }
            if changes.touches_identity() {
                let merged_name = changes.name.as_deref().unwrap_or(&current.name);
                check_unique(conn, merged_name, merged_hall, merged_station, Some(dish_id))?;
            }

            diesel::update(dishes.find(dish_id))
                .set(&changes)
                .get_result::<Dish>(conn)
                .map_err(|e| {
                    error!("update_dish: error updating dish {}: {}", dish_id, e);
                    RepositoryError::on_write(e, DUPLICATE_DISH, INVALID_STATION)
                })
        })
    }

    pub fn delete_dish(&self, dish_id: i32) -> Result<Dish, RepositoryError> {
        let mut conn = self.connection("delete_dish")?;

        diesel::delete(dishes.find(dish_id))
            .get_result::<Dish>(conn.connection())
            .map_err(|e| {
                if !matches!(e, diesel::result::Error::NotFound) {
                    error!("delete_dish: error deleting dish {}: {}", dish_id, e);
                }
                RepositoryError::on_lookup(e, "Dish")
            })
    }
}
