use runtime::{ClickOutside, NodeId, PointerBus};
use serde::Serialize;

/// Options whose lowercase form contains the lowercase `query`, in input order.
pub fn filter_options<'a, S: AsRef<str>>(options: &'a [S], query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    options
        .iter()
        .map(|option| option.as_ref())
        .filter(|option| option.to_lowercase().contains(&query))
        .collect()
}

/// Read-only field that opens a filterable option list.
///
/// The selected value is owned by the caller and passed in when rendering;
/// `select*` return the chosen option instead of storing it.
#[derive(Debug)]
pub struct SearchableSelect {
    options: Vec<String>,
    placeholder: String,
    filter: String,
    popover: ClickOutside,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectView {
    pub root: NodeId,
    /// The value, or the placeholder when no value is set.
    pub display: String,
    pub has_value: bool,
    pub open: bool,
    pub filter: String,
    /// Visible options; empty while closed.
    pub options: Vec<String>,
}

impl SearchableSelect {
    pub fn new<I, S>(root: NodeId, options: I, placeholder: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            placeholder: placeholder.into(),
            filter: String::new(),
            popover: ClickOutside::new(root),
        }
    }

    pub fn root(&self) -> NodeId {
        self.popover.root()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn is_open(&self) -> bool {
        self.popover.is_armed()
    }

    /// True while this widget's outside-click listener is attached.
    pub fn is_listening(&self) -> bool {
        self.popover.is_listening()
    }

    pub fn display_text<'a>(&'a self, value: &'a str) -> &'a str {
        if value.is_empty() {
            &self.placeholder
        } else {
            value
        }
    }

    /// Click on the read-only field.
    pub fn toggle(&mut self, bus: &PointerBus) {
        if self.is_open() {
            self.popover.disarm();
        } else {
            self.popover.arm(bus);
        }
    }

    pub fn close(&mut self) {
        self.popover.disarm();
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
    }

    pub fn visible_options(&self) -> Vec<&str> {
        filter_options(&self.options, &self.filter)
    }

    /// Picks the `index`-th visible option; closes the popover and clears the filter.
    pub fn select_visible(&mut self, index: usize) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let chosen = self.visible_options().get(index)?.to_string();
        self.finish_selection();
        Some(chosen)
    }

    /// Picks `option` by text; it must currently be visible.
    pub fn select(&mut self, option: &str) -> Option<String> {
        if !self.is_open() || !self.visible_options().contains(&option) {
            return None;
        }
        self.finish_selection();
        Some(option.to_string())
    }

    /// Back to the freshly mounted state: closed, no filter, no listener.
    pub fn reset(&mut self) {
        self.popover.disarm();
        self.filter.clear();
    }

    pub fn view(&self, value: &str) -> SelectView {
        let open = self.is_open();
        SelectView {
            root: self.root(),
            display: self.display_text(value).to_string(),
            has_value: !value.is_empty(),
            open,
            filter: self.filter.clone(),
            options: if open {
                self.visible_options().into_iter().map(String::from).collect()
            } else {
                Vec::new()
            },
        }
    }

    fn finish_selection(&mut self) {
        self.popover.disarm();
        self.filter.clear();
    }
}
