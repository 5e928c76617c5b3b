pub mod errors;
pub mod db;
pub mod category;
pub mod tag;
pub mod product;
pub mod product_tag;
pub mod product_image;
pub mod product_specification;
pub mod review;

#[cfg(test)]
mod tests;
