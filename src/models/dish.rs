use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::dining_hall::DiningHall;
use crate::models::station::Station;

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[diesel(table_name = crate::db::schema::dishes)]
#[diesel(belongs_to(DiningHall, foreign_key = dining_hall_id))]
#[diesel(belongs_to(Station, foreign_key = station_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Dish {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "Spaghetti Carbonara")]
    pub name: String,
    #[schema(example = "Classic Italian pasta with egg, cheese, pancetta, and pepper.")]
    pub description: Option<String>,
    #[schema(example = 2)]
    pub dining_hall_id: i32,
    #[schema(example = 10)]
    pub station_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct NewDish {
    pub name: String,
    pub description: Option<String>,
    pub dining_hall_id: i32,
    pub station_id: i32,
}

/// Partial dish update. An absent `description` leaves the stored one alone,
/// an explicit `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::dishes)]
pub struct UpdateDish {
    #[schema(example = "Spaghetti Bolognese")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_field",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "Pasta with ground beef in a tomato sauce.")]
    pub description: Option<Option<String>>,
    pub dining_hall_id: Option<i32>,
    pub station_id: Option<i32>,
}

impl UpdateDish {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.dining_hall_id.is_none()
            && self.station_id.is_none()
    }

    /// True when the update touches any column of the uniqueness key.
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.dining_hall_id.is_some() || self.station_id.is_some()
    }
}

/// Wraps a field that appeared in the body, `null` included.
fn present_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
