pub mod auth;
pub mod errors;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{load_config, serve};
