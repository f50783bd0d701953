use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::dining_halls)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DiningHall {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John Jay")]
    pub name: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::dining_halls)]
pub struct NewDiningHall {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::dining_halls)]
pub struct UpdateDiningHall {
    #[schema(example = "Ferris Booth Commons")]
    pub name: Option<String>,
}

impl UpdateDiningHall {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
