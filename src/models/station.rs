use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::dining_hall::DiningHall;

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
#[diesel(table_name = crate::db::schema::stations)]
#[diesel(belongs_to(DiningHall, foreign_key = dining_hall_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Station {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Grill")]
    pub name: String,
    #[schema(example = 1)]
    pub dining_hall_id: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::stations)]
pub struct NewStation {
    pub name: String,
    pub dining_hall_id: i32,
}

/// A station stays in the dining hall it was created in; only its name changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStation {
    #[schema(example = "Grill Station")]
    pub name: Option<String>,
}

impl UpdateStation {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
