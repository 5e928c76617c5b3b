use std::fmt::Display;

use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{} not found with id: {}", entity, id))
    }

    pub fn tags_not_found() -> Self { Self::NotFound("one or more tags were not found".into()) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self {
        let mut parts: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(move |err| format!("{}: {}", field, err.message.as_ref().unwrap_or(&err.code)))
            })
            .collect();
        if parts.is_empty() {
            return Self::Validation(e.to_string());
        }
        parts.sort();
        Self::Validation(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let e = ServiceError::not_found("Product", 42);
        assert_eq!(e.to_string(), "not found: Product not found with id: 42");
    }

    #[test]
    fn db_errors_are_server_side() {
        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
    }

    #[test]
    fn validation_errors_name_the_field() {
        let mut errs = ValidationErrors::new();
        errs.add("rating", validator::ValidationError::new("range").with_message("Rating must be between 1 and 5".into()));
        let e: ServiceError = errs.into();
        assert_eq!(e.to_string(), "validation error: rating: Rating must be between 1 and 5");
    }
}
