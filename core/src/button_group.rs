/// Value reported when a group has no active button. Markup always ships a
/// default-active button, so this only covers a group built without one.
pub const DEFAULT_SELECTION_VALUE: u8 = 3;

pub const LEVELS: [u8; 5] = [1, 2, 3, 4, 5];

/// Single-select toggle group keyed by integer values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonGroup {
    values: Vec<u8>,
    active: Option<usize>,
}

impl ButtonGroup {
    pub fn new(values: &[u8], default_value: u8) -> Self {
        let values = values.to_vec();
        let active = values.iter().position(|value| *value == default_value);
        Self { values, active }
    }

    /// The 1..=5 selector used for complexity and color usage.
    pub fn levels(default_value: u8) -> Self {
        Self::new(&LEVELS, default_value)
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn is_active(&self, value: u8) -> bool {
        self.selected() == Some(value)
    }

    pub fn selected(&self) -> Option<u8> {
        self.active.and_then(|index| self.values.get(index).copied())
    }

    pub fn selected_or_default(&self) -> u8 {
        self.selected().unwrap_or(DEFAULT_SELECTION_VALUE)
    }

    /// Activates the button carrying `value`. Unknown values leave the
    /// current selection in place and return `false`.
    pub fn select(&mut self, value: u8) -> bool {
        match self.values.iter().position(|candidate| *candidate == value) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active_count(&self) -> usize {
        usize::from(self.selected().is_some())
    }
}
