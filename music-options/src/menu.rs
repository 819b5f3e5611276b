//! Options-menu entries handed to the host menu framework.
use serde::{Deserialize, Serialize};

use crate::PreferenceStore;
use crate::category::Category;
use crate::options::{OptionList, clamp_preference};

/// How an entry presents its labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionWidget {
    /// Every label on one line, current one highlighted
    AllLabels,
    /// Only the current label, stepped left and right
    SingleLabel,
}

impl OptionWidget {
    /// Step right, stopping at the last choice.
    #[must_use]
    pub const fn next(self, current: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = current.saturating_add(1);
        if index > len - 1 { len - 1 } else { index }
    }

    /// Step left, stopping at the first choice.
    #[must_use]
    pub const fn prev(self, current: usize) -> usize {
        current.saturating_sub(1)
    }

    /// Labels the host should draw for the current selection.
    #[must_use]
    pub fn visible_labels<'a>(self, labels: &'a [String], current: usize) -> Vec<&'a str> {
        match self {
            Self::AllLabels => labels.iter().map(String::as_str).collect(),
            Self::SingleLabel => labels
                .get(current)
                .or_else(|| labels.first())
                .map(String::as_str)
                .into_iter()
                .collect(),
        }
    }
}

/// Description of one options-menu row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub key: String,
    pub category: Category,
    pub name: String,
    pub order: u32,
    pub description: String,
    pub widget: OptionWidget,
    pub labels: Vec<String>,
    /// Index of the Random choice, used by hosts that decorate it
    pub random_index: Option<usize>,
}

impl MenuEntry {
    #[must_use]
    pub fn new(
        category: Category,
        name: &str,
        order: u32,
        description: &str,
        widget: OptionWidget,
        options: &OptionList,
    ) -> Self {
        Self {
            key: category.menu_key().to_string(),
            category,
            name: name.to_string(),
            order,
            description: description.to_string(),
            widget,
            labels: options.labels().into_iter().map(str::to_string).collect(),
            random_index: options.random_index(),
        }
    }

    /// Current value for the menu getter: the stored index, or 0 when the
    /// preference is unset or no longer fits the list.
    #[must_use]
    pub fn current<P>(&self, prefs: &P) -> usize
    where
        P: PreferenceStore + ?Sized,
    {
        clamp_preference(prefs.music_preference(self.category), self.labels.len())
    }

    #[must_use]
    pub fn next(&self, current: usize) -> usize {
        self.widget.next(current, self.labels.len())
    }

    #[must_use]
    pub fn prev(&self, current: usize) -> usize {
        self.widget.prev(current)
    }

    #[must_use]
    pub fn visible_labels(&self, current: usize) -> Vec<&str> {
        self.widget.visible_labels(&self.labels, current)
    }
}
