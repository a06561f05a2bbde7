use std::collections::BTreeMap;

use catalog::{Category, FieldSpec};
use runtime::{NodeIds, PointerBus};
use serde::Serialize;

use crate::searchable_select::{SearchableSelect, SelectView};

/// A field selection to be written into the caller's form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub mandatory: bool,
    #[serde(flatten)]
    pub select: SelectView,
}

/// One dropdown per field of a category.
///
/// Holds no values: rendering reads them from the caller's form data and a
/// choice comes back as a [`FieldSelection`].
#[derive(Debug)]
pub struct CategoryForm {
    category: Category,
    selects: Vec<(&'static FieldSpec, SearchableSelect)>,
}

impl CategoryForm {
    pub fn new(category: Category, ids: &mut NodeIds) -> Self {
        let selects = category
            .fields()
            .iter()
            .map(|spec| {
                let select =
                    SearchableSelect::new(ids.alloc(), spec.options.iter().copied(), spec.placeholder);
                (spec, select)
            })
            .collect();
        Self { category, selects }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_empty(&self) -> bool {
        self.selects.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&SearchableSelect> {
        self.selects
            .iter()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, select)| select)
    }

    fn entry_mut(&mut self, name: &str) -> Option<(&'static FieldSpec, &mut SearchableSelect)> {
        let found = self
            .selects
            .iter_mut()
            .find(|(spec, _)| spec.name == name)
            .map(|(spec, select)| (*spec, select));
        if found.is_none() {
            tracing::debug!(category = %self.category, field = name, "no such form field");
        }
        found
    }

    pub fn toggle(&mut self, field: &str, bus: &PointerBus) {
        if let Some((_, select)) = self.entry_mut(field) {
            select.toggle(bus);
        }
    }

    pub fn set_filter(&mut self, field: &str, text: impl Into<String>) {
        if let Some((_, select)) = self.entry_mut(field) {
            select.set_filter(text);
        }
    }

    /// Picks the `index`-th visible option of `field`.
    pub fn choose(&mut self, field: &str, index: usize) -> Option<FieldSelection> {
        let (spec, select) = self.entry_mut(field)?;
        select.select_visible(index).map(|value| FieldSelection {
            field: spec.name,
            value,
        })
    }

    /// Picks `option` of `field` by text.
    pub fn choose_option(&mut self, field: &str, option: &str) -> Option<FieldSelection> {
        let (spec, select) = self.entry_mut(field)?;
        select.select(option).map(|value| FieldSelection {
            field: spec.name,
            value,
        })
    }

    /// The form left the screen: close every popover and drop filters.
    pub fn unmount(&mut self) {
        for (_, select) in &mut self.selects {
            select.reset();
        }
    }

    pub fn open_count(&self) -> usize {
        self.selects.iter().filter(|(_, s)| s.is_open()).count()
    }

    pub fn view(&self, values: &BTreeMap<String, String>) -> Vec<FieldView> {
        self.selects
            .iter()
            .map(|(spec, select)| {
                let value = values.get(spec.name).map(String::as_str).unwrap_or("");
                FieldView {
                    name: spec.name,
                    label: spec.label,
                    mandatory: spec.mandatory,
                    select: select.view(value),
                }
            })
            .collect()
    }
}
