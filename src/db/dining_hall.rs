use crate::db::errors::RepositoryError;
use crate::db::schema::dining_halls::dsl::*;
use crate::db::{contains_pattern, non_blank, required_text, resolve_limit, DbConnection};
use crate::enums::requests::{DiningHallFilter, DiningHallPayload};
use crate::models::dining_hall::{DiningHall, NewDiningHall, UpdateDiningHall};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

use log::error;

const DUPLICATE_NAME: &str = "Dining hall with the same name already exists";

#[derive(Clone)]
pub struct DiningHallOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl DiningHallOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_dining_hall(
        &self,
        payload: DiningHallPayload,
    ) -> Result<DiningHall, RepositoryError> {
        let hall_name = required_text(payload.name.as_deref(), "Name is required")?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_dining_hall: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            let taken = dining_halls
                .filter(name.eq(&hall_name))
                .select(id)
                .first::<i32>(conn)
                .optional()?;
            if taken.is_some() {
                return Err(RepositoryError::Conflict(DUPLICATE_NAME.to_string()));
            }

            diesel::insert_into(dining_halls)
                .values(&NewDiningHall {
                    name: hall_name.clone(),
                })
                .get_result::<DiningHall>(conn)
                .map_err(|e| {
                    error!(
                        "create_dining_hall: error inserting dining hall '{}': {}",
                        hall_name, e
                    );
                    RepositoryError::on_write(e, DUPLICATE_NAME, "Invalid dining hall")
                })
        })
    }

    pub fn list_dining_halls(
        &self,
        filter: &DiningHallFilter,
    ) -> Result<Vec<DiningHall>, RepositoryError> {
        let row_limit = resolve_limit(filter.limit, None)?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_dining_halls: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = dining_halls.into_boxed();
        if let Some(needle) = non_blank(filter.name.as_deref()) {
            query = query.filter(name.ilike(contains_pattern(needle)));
        }
        if let Some(row_limit) = row_limit {
            query = query.limit(row_limit);
        }

        query
            .order(id.asc())
            .load::<DiningHall>(conn.connection())
            .map_err(|e| {
                error!("list_dining_halls: error fetching dining halls: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_dining_hall(&self, hall_id: i32) -> Result<DiningHall, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_dining_hall: failed to acquire DB connection for id {}: {}",
                hall_id, e
            );
            e
        })?;

        dining_halls
            .find(hall_id)
            .first::<DiningHall>(conn.connection())
            .map_err(|e| RepositoryError::on_lookup(e, "Dining hall"))
    }

    pub fn update_dining_hall(
        &self,
        hall_id: i32,
        mut changes: UpdateDiningHall,
    ) -> Result<DiningHall, RepositoryError> {
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

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_dining_hall: failed to acquire DB connection for id {}: {}",
                hall_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            dining_halls
                .find(hall_id)
                .select(id)
                .first::<i32>(conn)
                .map_err(|e| RepositoryError::on_lookup(e, "Dining hall"))?;

            if let Some(new_name) = &changes.name {
                let taken = dining_halls
                    .filter(name.eq(new_name))
                    .filter(id.ne(hall_id))
                    .select(id)
                    .first::<i32>(conn)
                    .optional()?;
                if taken.is_some() {
                    return Err(RepositoryError::Conflict(DUPLICATE_NAME.to_string()));
                }
            }

            diesel::update(dining_halls.find(hall_id))
                .set(&changes)
                .get_result::<DiningHall>(conn)
                .map_err(|e| {
                    error!(
                        "update_dining_hall: error updating dining hall {}: {}",
                        hall_id, e
                    );
                    RepositoryError::on_write(e, DUPLICATE_NAME, "Invalid dining hall")
                })
        })
    }

    /// Removes a dining hall. Halls that still have stations or dishes are kept
    /// and reported as a conflict.
    pub fn delete_dining_hall(&self, hall_id: i32) -> Result<DiningHall, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_dining_hall: failed to acquire DB connection for id {}: {}",
                hall_id, e
            );
            e
        })?;

        conn.connection().transaction(|conn| {
            dining_halls
                .find(hall_id)
                .select(id)
                .first::<i32>(conn)
                .map_err(|e| RepositoryError::on_lookup(e, "Dining hall"))?;

            let station_count = {
                use crate::db::schema::stations;
                stations::table
                    .filter(stations::dining_hall_id.eq(hall_id))
                    .count()
                    .get_result::<i64>(conn)?
            };
            let dish_count = {
                use crate::db::schema::dishes;
                dishes::table
                    .filter(dishes::dining_hall_id.eq(hall_id))
                    .count()
                    .get_result::<i64>(conn)?
            };
            if station_count > 0 || dish_count > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "Dining hall {hall_id} still has {station_count} station(s) and {dish_count} dish(es)"
                )));
            }

            diesel::delete(dining_halls.find(hall_id))
                .get_result::<DiningHall>(conn)
                .map_err(|e| {
                    error!(
                        "delete_dining_hall: error deleting dining hall {}: {}",
                        hall_id, e
                    );
                    RepositoryError::on_delete(
                        e,
                        "Dining hall",
                        "Dining hall still has stations or dishes",
                    )
                })
        })
    }
}
