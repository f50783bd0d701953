use diesel::r2d2::{ConnectionManager, Pool};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod dining_hall;
mod dish;
mod errors;
pub mod schema;
mod station;

pub use dining_hall::DiningHallOperations;
pub use dish::DishOperations;
pub use errors::RepositoryError;
pub use station::StationOperations;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(
    database_url: &str,
    max_size: u32,
) -> Result<Pool<ConnectionManager<PgConnection>>, RepositoryError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(RepositoryError::ConnectionPoolError)
}

pub fn run_db_migrations(
    pool: Pool<ConnectionManager<PgConnection>>,
) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
    if !applied.is_empty() {
        info!("run_db_migrations: applied {} migration(s)", applied.len());
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

/// Builds an `ILIKE` pattern matching `needle` anywhere in the column.
/// `%`, `_` and `\` in the needle match literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Trims `value`; blank input counts as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Picks the row cap for a list query.
pub fn resolve_limit(
    requested: Option<i64>,
    default: Option<i64>,
) -> Result<Option<i64>, RepositoryError> {
    match requested {
        Some(limit) if limit < 0 => Err(RepositoryError::ValidationError(format!(
            "limit must not be negative, got {limit}"
        ))),
        Some(limit) => Ok(Some(limit)),
        None => Ok(default),
    }
}

/// Longest name, in characters, the name columns hold.
pub const MAX_NAME_LEN: usize = 255;

/// Rejects text Postgres cannot store.
pub fn storable_text(value: &str, field: &str) -> Result<(), RepositoryError> {
    if value.contains('\0') {
        return Err(RepositoryError::ValidationError(format!(
            "{field} must not contain NUL characters"
        )));
    }
    Ok(())
}

/// Validates an already trimmed, non-blank name.
pub fn checked_name(value: &str) -> Result<String, RepositoryError> {
    storable_text(value, "Name")?;
    if value.chars().count() > MAX_NAME_LEN {
        return Err(RepositoryError::ValidationError(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(value.to_string())
}

pub(crate) fn required_text(value: Option<&str>, message: &str) -> Result<String, RepositoryError> {
    let name = non_blank(value)
        .ok_or_else(|| RepositoryError::ValidationError(message.to_string()))?;
    checked_name(name)
}
