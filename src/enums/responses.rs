use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub rel: &'static str,
    pub href: String,
    pub method: &'static str,
}

pub type Links = BTreeMap<&'static str, Link>;

/// An entity with its hyperlinks. The entity's own fields sit at the top level.
#[derive(Serialize, Debug)]
pub struct Resource<T: Serialize> {
    #[serde(flatten)]
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Serialize, Debug)]
pub struct Confirmation {
    pub id: i32,
    pub message: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Dish not found")]
    pub error: String,
}
