use std::collections::BTreeMap;

use serde::Serialize;

use crate::CatalogError;
use crate::category::Category;

static NO_FIELDS: BTreeMap<String, String> = BTreeMap::new();

/// Selected option per field, per category.
///
/// Every configured field of every category is always present; unset
/// fields hold the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormData {
    values: BTreeMap<Category, BTreeMap<String, String>>,
}

impl Default for FormData {
    fn default() -> Self {
        let values = Category::ALL
            .into_iter()
            .map(|category| {
                let fields = category
                    .fields()
                    .iter()
                    .map(|f| (f.name.to_string(), String::new()))
                    .collect();
                (category, fields)
            })
            .collect();
        Self { values }
    }
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self, category: Category) -> &BTreeMap<String, String> {
        self.values.get(&category).unwrap_or(&NO_FIELDS)
    }

    pub fn value(&self, category: Category, field: &str) -> &str {
        self.fields(category)
            .get(field)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Stores `value` for `field`; other categories are untouched.
    pub fn set(
        &mut self,
        category: Category,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), CatalogError> {
        if category.field(field).is_none() {
            return Err(CatalogError::UnknownField {
                category,
                field: field.to_string(),
            });
        }
        self.values
            .entry(category)
            .or_default()
            .insert(field.to_string(), value.into());
        Ok(())
    }

    /// Mandatory fields of `category` that are still empty, in field order.
    pub fn missing_mandatory(&self, category: Category) -> Vec<&'static str> {
        category
            .mandatory_fields()
            .filter(|f| self.value(category, f.name).is_empty())
            .map(|f| f.name)
            .collect()
    }

    pub fn is_complete(&self, category: Category) -> bool {
        self.missing_mandatory(category).is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
