//! Catalog use cases on top of the `models` entities.
//! - Repositories hold the queries, services hold the rules and transactions.
//! - Responses are projected through `projection` with batched aggregates.

pub mod errors;
pub mod dto;
pub mod search;
pub mod repository;
pub mod projection;
pub mod product_service;
pub mod category_service;
pub mod tag_service;
pub mod review_service;
#[cfg(test)]
pub mod test_support;
#[cfg(test)]
mod tests;

pub use category_service::CategoryService;
pub use product_service::ProductService;
pub use review_service::ReviewService;
pub use tag_service::TagService;
