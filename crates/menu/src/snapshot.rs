//! Handler-free view of a menu for the platform boundary.

use crate::event::ItemId;

/// A single entry as the platform shell sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySnapshot {
    /// A clickable item.
    Item {
        /// Id the shell reports back on selection.
        id: ItemId,
        /// Display text.
        text: String,
        /// Whether the item is clickable.
        enabled: bool,
    },
    /// A non-interactive separator.
    Separator,
}

/// Ordered, handler-free copy of a menu, handed to the platform shell for
/// display. Order matches the owning menu's insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSnapshot {
    entries: Vec<EntrySnapshot>,
}

impl MenuSnapshot {
    pub(crate) fn new(entries: Vec<EntrySnapshot>) -> Self {
        Self { entries }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[EntrySnapshot] {
        &self.entries
    }

    /// Display texts of the clickable items, in order.
    pub fn item_texts(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                EntrySnapshot::Item { text, .. } => Some(text.as_str()),
                EntrySnapshot::Separator => None,
            })
            .collect()
    }

    /// Returns whether the snapshot contains an item with the given id.
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, EntrySnapshot::Item { id: i, .. } if *i == id))
    }
}
