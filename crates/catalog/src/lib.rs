//! Data-collection categories, their form fields, and the per-category form store.
//!
//! Validation rules live next to the field definitions: a category is ready
//! to submit when every field flagged `mandatory` holds a non-empty value.

pub mod category;
pub mod fields;
pub mod form_data;

pub use category::*;
pub use fields::*;
pub use form_data::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UnknownCategory(String),
    UnknownField { category: Category, field: String },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::UnknownCategory(id) => write!(f, "unknown category: {id}"),
            CatalogError::UnknownField { category, field } => {
                write!(f, "category {category} has no field named {field}")
            }
        }
    }
}

impl std::error::Error for CatalogError {}
