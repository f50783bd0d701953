use crate::enums::responses::{Confirmation, Link, Links, Resource};
use crate::models::dining_hall::DiningHall;
use crate::models::dish::Dish;
use crate::models::station::Station;
use serde::Serialize;

pub struct LinkTemplate {
    pub rel: &'static str,
    pub path: &'static str,
    pub method: &'static str,
}

const fn link(rel: &'static str, path: &'static str, method: &'static str) -> LinkTemplate {
    LinkTemplate { rel, path, method }
}

pub const DINING_HALL_LINKS: &[LinkTemplate] = &[
    link("self", "/api/v1/dining_halls/{id}", "GET"),
    link("update", "/api/v1/dining_halls/{id}", "PUT"),
    link("delete", "/api/v1/dining_halls/{id}", "DELETE"),
    link("collection", "/api/v1/dining_halls", "GET"),
    link("create", "/api/v1/dining_halls", "POST"),
    link("get_stations", "/api/v1/dining_halls/{id}/stations", "GET"),
    link("create_station", "/api/v1/dining_halls/{id}/stations", "POST"),
];

pub const STATION_LINKS: &[LinkTemplate] = &[
    link("self", "/api/v1/dining_halls/{dining_hall_id}/stations/{id}", "GET"),
    link("update", "/api/v1/dining_halls/{dining_hall_id}/stations/{id}", "PUT"),
    link("delete", "/api/v1/dining_halls/{dining_hall_id}/stations/{id}", "DELETE"),
    link("collection", "/api/v1/dining_halls/{dining_hall_id}/stations", "GET"),
    link("create", "/api/v1/dining_halls/{dining_hall_id}/stations", "POST"),
    link("dining_hall", "/api/v1/dining_halls/{dining_hall_id}", "GET"),
    link("get_dishes", "/api/v1/dishes?station_id={id}", "GET"),
];

pub const DISH_LINKS: &[LinkTemplate] = &[
    link("self", "/api/v1/dishes/{id}", "GET"),
    link("update", "/api/v1/dishes/{id}", "PUT"),
    link("delete", "/api/v1/dishes/{id}", "DELETE"),
    link("collection", "/api/v1/dishes", "GET"),
    link("create", "/api/v1/dishes", "POST"),
    link("dining_hall", "/api/v1/dining_halls/{dining_hall_id}", "GET"),
    link(
        "station",
        "/api/v1/dining_halls/{dining_hall_id}/stations/{station_id}",
        "GET",
    ),
];

/// Relations that stay meaningful once the entity itself is gone.
const COLLECTION_RELS: &[&str] = &["collection", "create"];

/// Substitutes `{name}` placeholders in `template` with the matching values.
pub fn expand_path(template: &str, params: &[(&str, i32)]) -> String {
    params.iter().fold(template.to_string(), |path, (key, value)| {
        path.replace(&format!("{{{key}}}"), &value.to_string())
    })
}

pub fn render_links<'a>(
    templates: impl IntoIterator<Item = &'a LinkTemplate>,
    params: &[(&str, i32)],
) -> Links {
    templates
        .into_iter()
        .map(|t| {
            (
                t.rel,
                Link {
                    rel: t.rel,
                    href: expand_path(t.path, params),
                    method: t.method,
                },
            )
        })
        .collect()
}

/// An entity that can describe the operations around it as hyperlinks.
pub trait HyperLinked: Serialize + Sized {
    const LINKS: &'static [LinkTemplate];

    fn id(&self) -> i32;

    /// Values for the placeholders used in `LINKS`.
    fn path_params(&self) -> Vec<(&'static str, i32)>;

    fn links(&self) -> Links {
        render_links(Self::LINKS, &self.path_params())
    }

    fn collection_links(&self) -> Links {
        render_links(
            Self::LINKS.iter().filter(|t| COLLECTION_RELS.contains(&t.rel)),
            &self.path_params(),
        )
    }

    fn into_resource(self) -> Resource<Self> {
        Resource {
            links: self.links(),
            data: self,
            message: None,
        }
    }

    fn into_resource_with_message(self, message: &str) -> Resource<Self> {
        Resource {
            message: Some(message.to_string()),
            ..self.into_resource()
        }
    }

    fn into_confirmation(self, message: &str) -> Confirmation {
        Confirmation {
            id: self.id(),
            message: message.to_string(),
            links: self.collection_links(),
        }
    }
}

impl HyperLinked for DiningHall {
    const LINKS: &'static [LinkTemplate] = DINING_HALL_LINKS;

    fn id(&self) -> i32 {
        self.id
    }

    fn path_params(&self) -> Vec<(&'static str, i32)> {
        vec![("id", self.id)]
    }
}

impl HyperLinked for Station {
    const LINKS: &'static [LinkTemplate] = STATION_LINKS;

    fn id(&self) -> i32 {
        self.id
    }

    fn path_params(&self) -> Vec<(&'static str, i32)> {
        vec![("id", self.id), ("dining_hall_id", self.dining_hall_id)]
    }
}

impl HyperLinked for Dish {
    const LINKS: &'static [LinkTemplate] = DISH_LINKS;

    fn id(&self) -> i32 {
        self.id
    }

    fn path_params(&self) -> Vec<(&'static str, i32)> {
        vec![
            ("id", self.id),
            ("dining_hall_id", self.dining_hall_id),
            ("station_id", self.station_id),
        ]
    }
}
