pub mod dining_hall;
pub mod dish;
pub mod station;
