#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Generator,
    Extractor,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Generator, Tab::Extractor];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Generator => "generator-tab-content",
            Tab::Extractor => "extractor-tab-content",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Generator => "Generate",
            Tab::Extractor => "Image to SVG",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

/// Mutually exclusive panes. `None` means every pane is hidden, which is
/// where an unknown id leaves things.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabSet {
    active: Option<Tab>,
}

impl Default for TabSet {
    fn default() -> Self {
        Self {
            active: Some(Tab::Generator),
        }
    }
}

impl TabSet {
    pub fn active(&self) -> Option<Tab> {
        self.active
    }

    pub fn switch(&mut self, id: &str) {
        self.active = Tab::from_id(id);
    }

    pub fn show(&mut self, tab: Tab) {
        self.active = Some(tab);
    }

    pub fn is_visible(&self, tab: Tab) -> bool {
        self.active == Some(tab)
    }

    pub fn history_visible(&self) -> bool {
        self.is_visible(Tab::Generator)
    }

    pub fn output_visible(&self) -> bool {
        self.active.is_some()
    }
}
