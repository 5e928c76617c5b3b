//! Hand-written data access functions, one module per aggregate.
//!
//! Every function is generic over `ConnectionTrait` so services can run
//! them on a pooled connection or inside a transaction.

pub mod category_repo;
pub mod product_repo;
pub mod review_repo;
pub mod tag_repo;

/// Most ids bound into one `IN (...)` list; batch loaders split longer
/// lists so a statement stays well under the backend's parameter limit.
pub const ID_CHUNK: usize = 1000;
