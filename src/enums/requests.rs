use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

// Bodies keep every field optional so a missing field reaches the access layer
// and comes back as a validation error with a readable message.

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DiningHallPayload {
    #[schema(example = "John Jay")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StationPayload {
    #[schema(example = "Grill Station")]
    pub name: Option<String>,
    /// Required on `/stations`; on the nested route it must match the path when given.
    #[schema(example = 1)]
    pub dining_hall_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DishPayload {
    #[schema(example = "Spaghetti Carbonara")]
    pub name: Option<String>,
    #[schema(example = "Classic Italian pasta with egg, cheese, pancetta, and pepper.")]
    pub description: Option<String>,
    #[schema(example = 2)]
    pub dining_hall_id: Option<i32>,
    #[schema(example = 10)]
    pub station_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiningHallFilter {
    /// Case-insensitive substring of the dining hall name
    #[param(example = "John")]
    pub name: Option<String>,
    /// Maximum number of dining halls returned
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StationFilter {
    /// Case-insensitive substring of the station name
    #[param(example = "Grill")]
    pub name: Option<String>,
    pub dining_hall_id: Option<i32>,
    /// Maximum number of stations returned
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DishFilter {
    /// Case-insensitive substring of the dish name
    #[param(example = "Spaghetti")]
    pub name: Option<String>,
    /// Case-insensitive substring of the description
    #[param(example = "pasta")]
    pub description: Option<String>,
    pub dining_hall_id: Option<i32>,
    pub station_id: Option<i32>,
    /// Maximum number of dishes returned (default 10)
    #[param(example = 5)]
    pub limit: Option<i64>,
}
