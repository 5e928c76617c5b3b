/// CRUD operations tests for the catalog entities
pub mod crud_tests;

/// Relation traversal tests (belongs-to, has-many, many-to-many)
pub mod relation_tests;
