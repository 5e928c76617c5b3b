//! Request and response shapes exchanged with HTTP clients.
//!
//! Field names are camelCase on the wire. Request types derive `Validate`;
//! the rules mirror the catalog's column limits.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use models::{category, review, tag};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(
        length(min = 3, max = 100, message = "Category name must be between 3 and 100 characters"),
        custom(function = "not_blank", message = "Category name is required")
    )]
    pub name: String,
    #[validate(length(max = 500, message = "Description cannot exceed 500 characters"))]
    pub description: Option<String>,
    pub active: Option<bool>,
}

impl From<category::Model> for CategoryDto {
    fn from(m: category::Model) -> Self {
        Self { id: Some(m.id), name: m.name, description: m.description, active: Some(m.active) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(
        length(min = 2, max = 50, message = "Tag name must be between 2 and 50 characters"),
        custom(function = "not_blank", message = "Tag name is required")
    )]
    pub name: String,
}

impl From<tag::Model> for TagDto {
    fn from(m: tag::Model) -> Self {
        Self { id: Some(m.id), name: m.name }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    #[serde(default)]
    pub id: Option<i32>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(max = 1000, message = "Comment cannot exceed 1000 characters"))]
    pub comment: Option<String>,
    #[validate(length(max = 100, message = "Author cannot exceed 100 characters"))]
    pub author: Option<String>,
    /// Set by the server; ignored on input.
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl From<review::Model> for ReviewDto {
    fn from(m: review::Model) -> Self {
        Self {
            id: Some(m.id),
            rating: m.rating,
            comment: m.comment,
            author: m.author,
            created_at: Some(m.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(
        length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    #[validate(
        required(message = "Price is required"),
        range(exclusive_min = 0.0, message = "Price must be positive")
    )]
    pub price: Option<f64>,
    #[validate(
        required(message = "Stock quantity is required"),
        range(min = 1, message = "Stock quantity must be positive")
    )]
    pub stock_quantity: Option<i32>,
    pub category_id: Option<i32>,
    pub tag_ids: Option<BTreeSet<i32>>,
    pub image_urls: Option<Vec<String>>,
    #[validate(nested)]
    pub reviews: Option<Vec<ReviewDto>>,
    pub specifications: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
    pub active: bool,
    pub category: Option<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub reviews: Vec<ReviewDto>,
    pub image_urls: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub average_rating: f64,
    pub total_reviews: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub total_reviews: i32,
}
