use crate::db::errors::RepositoryError;
use crate::db::schema::stations::dsl::*;
use crate::db::{
    checked_name, contains_pattern, non_blank, required_text, resolve_limit, DbConnection,
};
use crate::enums::requests::{StationFilter, StationPayload};
use crate::models::station::{NewStation, Station, UpdateStation};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::{debug, error};

const DUPLICATE_NAME: &str = "Station with the same name already exists for this dining hall";

#[derive(Clone)]
pub struct StationOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

fn hall_exists(conn: &mut PgConnection, hall_id: i32) -> Result<bool, RepositoryError> {
    use crate::db::schema::dining_halls;
    let found = dining_halls::table
        .find(hall_id)
        .select(dining_halls::id)
        .first::<i32>(conn)
        .optional()?;
    Ok(found.is_some())
}

/// Loads a station, optionally requiring it to belong to `within_hall`.
fn load_station(
    conn: &mut PgConnection,
    station_id: i32,
    within_hall: Option<i32>,
) -> Result<Station, RepositoryError> {
    let station = stations
        .find(station_id)
        .first::<Station>(conn)
        .map_err(|e| RepositoryError::on_lookup(e, "Station"))?;
    match within_hall {
        Some(hall_id) if station.dining_hall_id != hall_id => {
            debug!(
                "load_station: station {} belongs to dining hall {}, not {}",
                station_id, station.dining_hall_id, hall_id
            );
            Err(RepositoryError::NotFound("Station not found".to_string()))
        }
        _ => Ok(station),
    }
}

fn insert_station(
    conn: &mut PgConnection,
    station_name: String,
    hall_id: i32,
) -> Result<Station, RepositoryError> {
    let taken = stations
        .filter(name.eq(&station_name))
        .filter(dining_hall_id.eq(hall_id))
        .select(id)
        .first::<i32>(conn)
        .optional()?;
    if taken.is_some() {
        return Err(RepositoryError::Conflict(DUPLICATE_NAME.to_string()));
    }

    diesel::insert_into(stations)
        .values(&NewStation {
            name: station_name,
            dining_hall_id: hall_id,
        })
        .get_result::<Station>(conn)
        .map_err(|e| {
            error!(
                "insert_station: error inserting station into dining hall {}: {}",
                hall_id, e
            );
            RepositoryError::on_write(e, DUPLICATE_NAME, "Invalid dining_hall_id")
        })
}

impl StationOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    fn connection(&self, op: &str) -> Result<DbConnection<'_>, RepositoryError> {
        DbConnection::new(&self.pool).map_err(|e| {
            error!("{}: failed to acquire DB connection: {}", op, e);
            e
        })
    }

    /// Creates a station from a body carrying its dining hall. An unknown
    /// dining hall is an invalid reference.
    pub fn create_station(&self, payload: StationPayload) -> Result<Station, RepositoryError> {
        let (station_name, hall_id) = match (non_blank(payload.name.as_deref()), payload.dining_hall_id)
        {
            (Some(n), Some(hall)) => (checked_name(n)?, hall),
            _ => {
                return Err(RepositoryError::ValidationError(
                    "Name and dining_hall_id are required".to_string(),
                ))
            }
        };

        let mut conn = self.connection("create_station")?;
        conn.connection().transaction(|conn| {
            if !hall_exists(conn, hall_id)? {
                return Err(RepositoryError::InvalidReference(
                    "Dining hall not found".to_string(),
                ));
            }
            insert_station(conn, station_name, hall_id)
        })
    }

    /// Creates a station inside the dining hall named by the route. An unknown
    /// dining hall is not found.
    pub fn create_hall_station(
        &self,
        hall_id: i32,
        payload: StationPayload,
    ) -> Result<Station, RepositoryError> {
        let station_name = required_text(payload.name.as_deref(), "Name is required")?;
        if payload.dining_hall_id.is_some_and(|body_hall| body_hall != hall_id) {
            return Err(RepositoryError::ValidationError(
                "dining_hall_id does not match the dining hall in the path".to_string(),
            ));
        }

        let mut conn = self.connection("create_hall_station")?;
        conn.connection().transaction(|conn| {
            if !hall_exists(conn, hall_id)? {
                return Err(RepositoryError::NotFound(
                    "Dining hall not found".to_string(),
                ));
            }
            insert_station(conn, station_name, hall_id)
        })
    }

    pub fn list_stations(&self, filter: &StationFilter) -> Result<Vec<Station>, RepositoryError> {
        let row_limit = resolve_limit(filter.limit, None)?;
        let mut conn = self.connection("list_stations")?;

        let mut query = stations.into_boxed();
        if let Some(needle) = non_blank(filter.name.as_deref()) {
            query = query.filter(name.ilike(contains_pattern(needle)));
        }
        if let Some(hall_id) = filter.dining_hall_id {
            query = query.filter(dining_hall_id.eq(hall_id));
        }
        if let Some(row_limit) = row_limit {
            query = query.limit(row_limit);
        }

        query
            .order(id.asc())
            .load::<Station>(conn.connection())
            .map_err(|e| {
                error!("list_stations: error fetching stations: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Lists the stations of one dining hall; the hall itself must exist.
    pub fn list_hall_stations(
        &self,
        hall_id: i32,
        filter: &StationFilter,
    ) -> Result<Vec<Station>, RepositoryError> {
        {
            let mut conn = self.connection("list_hall_stations")?;
            if !hall_exists(conn.connection(), hall_id)? {
                return Err(RepositoryError::NotFound(
                    "Dining hall not found".to_string(),
                ));
            }
        }

        self.list_stations(&StationFilter {
            dining_hall_id: Some(hall_id),
            ..filter.clone()
        })
    }

    pub fn get_station(&self, station_id: i32) -> Result<Station, RepositoryError> {
        let mut conn = self.connection("get_station")?;
        load_station(conn.connection(), station_id, None)
    }

    pub fn get_hall_station(&self, hall_id: i32, station_id: i32) -> Result<Station, RepositoryError> {
        let mut conn = self.connection("get_hall_station")?;
        load_station(conn.connection(), station_id, Some(hall_id))
    }

    pub fn update_station(
        &self,
        station_id: i32,
        changes: UpdateStation,
    ) -> Result<Station, RepositoryError> {
        self.update_station_within(station_id, None, changes)
    }

    pub fn update_hall_station(
        &self,
        hall_id: i32,
        station_id: i32,
        changes: UpdateStation,
    ) -> Result<Station, RepositoryError> {
        self.update_station_within(station_id, Some(hall_id), changes)
    }

    fn update_station_within(
        &self,
        station_id: i32,
        within_hall: Option<i32>,
        changes: UpdateStation,
    ) -> Result<Station, RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No fields to update".to_string(),
            ));
        }
        let new_name = required_text(changes.name.as_deref(), "Name must not be empty")?;

        let mut conn = self.connection("update_station")?;
        conn.connection().transaction(|conn| {
            let current = load_station(conn, station_id, within_hall)?;

            let taken = stations
                .filter(name.eq(&new_name))
                .filter(dining_hall_id.eq(current.dining_hall_id))
                .filter(id.ne(station_id))
                .select(id)
                .first::<i32>(conn)
                .optional()?;
            if taken.is_some() {
                return Err(RepositoryError::Conflict(DUPLICATE_NAME.to_string()));
            }

            diesel::update(stations.find(station_id))
                .set(name.eq(&new_name))
                .get_result::<Station>(conn)
                .map_err(|e| {
                    error!(
                        "update_station: error updating station {}: {}",
                        station_id, e
                    );
                    RepositoryError::on_write(e, DUPLICATE_NAME, "Invalid dining_hall_id")
                })
        })
    }

    pub fn delete_station(&self, station_id: i32) -> Result<Station, RepositoryError> {
        self.delete_station_within(station_id, None)
    }

    pub fn delete_hall_station(
        &self,
        hall_id: i32,
        station_id: i32,
    ) -> Result<Station, RepositoryError> {
        self.delete_station_within(station_id, Some(hall_id))
    }

    /// Stations that still serve dishes are kept and reported as a conflict.
    fn delete_station_within(
        &self,
        station_id: i32,
        within_hall: Option<i32>,
    ) -> Result<Station, RepositoryError> {
        let mut conn = self.connection("delete_station")?;
        conn.connection().transaction(|conn| {
            load_station(conn, station_id, within_hall)?;

            let dish_count = {
                use crate::db::schema::dishes;
                dishes::table
                    .filter(dishes::station_id.eq(station_id))
                    .count()
                    .get_result::<i64>(conn)?
            };
            if dish_count > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "Station {station_id} still has {dish_count} dish(es)"
                )));
            }

            diesel::delete(stations.find(station_id))
                .get_result::<Station>(conn)
                .map_err(|e| {
                    error!(
                        "delete_station: error deleting station {}: {}",
                        station_id, e
                    );
                    RepositoryError::on_delete(e, "Station", "Station still has dishes")
                })
        })
    }
}
