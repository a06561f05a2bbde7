use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;
use crate::fields::{FieldSpec, HEALTHCARE_FIELDS};

/// The data-collection domain picked on the tab switcher.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Education,
    Healthcare,
}

impl Category {
    /// Tab order.
    pub const ALL: [Category; 2] = [Category::Education, Category::Healthcare];

    /// Identifier used on the wire and in the `/predict/{category}` path.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Education => "education",
            Category::Healthcare => "healthcare",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Healthcare => "Healthcare",
        }
    }

    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Category::Education => &[],
            Category::Healthcare => HEALTHCARE_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn mandatory_fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields().iter().filter(|f| f.mandatory)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Category;
    use crate::CatalogError;

    #[test]
    fn parses_wire_ids() {
        assert_eq!("education".parse::<Category>(), Ok(Category::Education));
        assert_eq!(" Healthcare ".parse::<Category>(), Ok(Category::Healthcare));
        assert_eq!(
            "transport".parse::<Category>(),
            Err(CatalogError::UnknownCategory("transport".to_string()))
        );
    }

    #[test]
    fn default_tab_is_education() {
        assert_eq!(Category::default(), Category::Education);
        assert_eq!(Category::ALL[0], Category::Education);
    }

    #[test]
    fn only_healthcare_has_mandatory_fields() {
        assert_eq!(Category::Education.mandatory_fields().count(), 0);
        let names: Vec<_> = Category::Healthcare
            .mandatory_fields()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["facilityOwnerType", "facilityType"]);
    }

    #[test]
    fn serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();
        assert_eq!(json, "\"healthcare\"");
    }
}
