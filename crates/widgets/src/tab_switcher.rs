use catalog::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: Category,
    pub label: &'static str,
    pub highlighted: bool,
}

/// Mutually exclusive category buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSwitcher {
    tabs: Vec<Category>,
}

impl Default for TabSwitcher {
    fn default() -> Self {
        Self {
            tabs: Category::ALL.to_vec(),
        }
    }
}

impl TabSwitcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Category] {
        &self.tabs
    }

    /// The tab to activate for a click on `tab`, if it is one of ours.
    pub fn click(&self, tab: Category) -> Option<Category> {
        self.tabs.contains(&tab).then_some(tab)
    }

    pub fn click_index(&self, index: usize) -> Option<Category> {
        self.tabs.get(index).copied()
    }

    pub fn view(&self, active: Category) -> Vec<TabView> {
        self.tabs
            .iter()
            .map(|&tab| TabView {
                id: tab,
                label: tab.label(),
                highlighted: tab == active,
            })
            .collect()
    }
}
