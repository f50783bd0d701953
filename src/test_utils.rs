use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::models::dining_hall::NewDiningHall;
use crate::models::dish::NewDish;
use crate::models::station::NewStation;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

// Fixture layout (ids are stable because reset_db restarts identities):
//   dining halls: 1 "John Jay", 2 "Ferris Booth Commons"
//   stations:     1 "Grill" (hall 1), 2 "Pasta Bar" (hall 1), 3 "Deli" (hall 2)
//   dishes:       1 "Burger" (Grill), 2 "Penne Arrabbiata" (Pasta Bar),
//                 3 "Turkey Club" (Deli)

pub fn build_test_pool(
    database_url: &str,
) -> Result<Pool<ConnectionManager<PgConnection>>, RepositoryError> {
    let pool = establish_connection_pool(database_url, 4)?;
    run_db_migrations(pool.clone())?;
    Ok(pool)
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query("TRUNCATE TABLE dishes, stations, dining_halls RESTART IDENTITY CASCADE")
        .execute(conn.connection())
        .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub dining_hall_ids: Vec<i32>,
    pub station_ids: Vec<i32>,
    pub dish_ids: Vec<i32>,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let john_jay = insert_dining_hall(conn.connection(), "John Jay")?;
    let ferris = insert_dining_hall(conn.connection(), "Ferris Booth Commons")?;

    let grill = insert_station(conn.connection(), john_jay, "Grill")?;
    let pasta_bar = insert_station(conn.connection(), john_jay, "Pasta Bar")?;
    let deli = insert_station(conn.connection(), ferris, "Deli")?;

    let burger = insert_dish(
        conn.connection(),
        john_jay,
        grill,
        "Burger",
        Some("Beef patty with cheddar"),
    )?;
    let penne = insert_dish(
        conn.connection(),
        john_jay,
        pasta_bar,
        "Penne Arrabbiata",
        Some("Penne in a spicy tomato sauce"),
    )?;
    let club = insert_dish(conn.connection(), ferris, deli, "Turkey Club", None)?;

    Ok(TestFixtures {
        dining_hall_ids: vec![john_jay, ferris],
        station_ids: vec![grill, pasta_bar, deli],
        dish_ids: vec![burger, penne, club],
    })
}

pub fn insert_dining_hall(conn: &mut PgConnection, name_val: &str) -> Result<i32, RepositoryError> {
    use crate::db::schema::dining_halls::dsl::*;

    diesel::insert_into(dining_halls)
        .values(&NewDiningHall {
            name: name_val.to_string(),
        })
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_station(
    conn: &mut PgConnection,
    hall_id: i32,
    name_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::stations::dsl::*;

    diesel::insert_into(stations)
        .values(&NewStation {
            name: name_val.to_string(),
            dining_hall_id: hall_id,
        })
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_dish(
    conn: &mut PgConnection,
    hall_id: i32,
    station: i32,
    name_val: &str,
    description_val: Option<&str>,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::dishes::dsl::*;

    diesel::insert_into(dishes)
        .values(&NewDish {
            name: name_val.to_string(),
            description: description_val.map(str::to_string),
            dining_hall_id: hall_id,
            station_id: station,
        })
        .returning(id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn count_rows(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(i64, i64, i64), RepositoryError> {
    use crate::db::schema::{dining_halls, dishes, stations};

    let mut conn = DbConnection::new(pool)?;
    let halls = dining_halls::table.count().get_result(conn.connection())?;
    let station_count = stations::table.count().get_result(conn.connection())?;
    let dish_count = dishes::table.count().get_result(conn.connection())?;
    Ok((halls, station_count, dish_count))
}
