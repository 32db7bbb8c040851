pub mod handler;
pub mod model;
pub mod repository;
pub mod routes;
