//! Ordered menu of items and separators.

use std::fmt;

use crate::event::{ItemHandler, ItemId, MenuItemEvent};
use crate::snapshot::{EntrySnapshot, MenuSnapshot};

/// Descriptor returned when an item is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemHandle {
    /// Id assigned to the new item.
    pub id: ItemId,
    /// Display text of the new item.
    pub text: String,
}

/// A clickable menu item.
pub struct MenuItem {
    id: ItemId,
    text: String,
    enabled: bool,
    handler: Option<ItemHandler>,
}

impl MenuItem {
    /// Id of this item, unique within its menu.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the item is clickable.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a handler record is attached.
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("enabled", &self.enabled)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// A single menu entry: a clickable item or a separator.
#[derive(Debug)]
pub enum MenuEntry {
    /// A clickable item.
    Item(MenuItem),
    /// A non-interactive separator.
    Separator,
}

/// An ordered menu. Insertion order is display order.
///
/// Menus are owned exclusively by whatever holds them (typically a tray
/// icon); there is no sharing and no interior mutability.
#[derive(Debug, Default)]
pub struct Menu {
    next_id: u32,
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clickable item without a handler.
    pub fn add_item(&mut self, text: impl Into<String>) -> ItemHandle {
        self.push_item(text.into(), None)
    }

    /// Appends a clickable item with a handler invoked on activation.
    pub fn add_item_with(
        &mut self,
        text: impl Into<String>,
        handler: impl FnMut(&MenuItemEvent) + 'static,
    ) -> ItemHandle {
        self.push_item(text.into(), Some(Box::new(handler)))
    }

    /// Appends a non-interactive separator.
    pub fn add_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
    }

    fn push_item(&mut self, text: String, handler: Option<ItemHandler>) -> ItemHandle {
        let id = ItemId(self.next_id);
        self.next_id += 1;

        self.entries.push(MenuEntry::Item(MenuItem {
            id,
            text: text.clone(),
            enabled: true,
            handler,
        }));

        ItemHandle { id, text }
    }

    /// Removes the item with the given id.
    ///
    /// Returns `false` when no such item exists. Separators cannot be
    /// removed by id since they carry none. The id is never reused.
    pub fn remove_item(&mut self, id: ItemId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|e| !matches!(e, MenuEntry::Item(item) if item.id == id));
        self.entries.len() != before
    }

    /// Enables or disables the item with the given id.
    ///
    /// Disabled items stay visible but do not dispatch. Returns `false`
    /// when no such item exists.
    pub fn set_enabled(&mut self, id: ItemId, enabled: bool) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Clickable items in display order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.entries.iter().filter_map(|e| match e {
            MenuEntry::Item(item) => Some(item),
            MenuEntry::Separator => None,
        })
    }

    /// Looks up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&MenuItem> {
        self.items().find(|i| i.id == id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut MenuItem> {
        self.entries.iter_mut().find_map(|e| match e {
            MenuEntry::Item(item) if item.id == id => Some(item),
            _ => None,
        })
    }

    /// Number of entries, separators included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Activates the item with the given id, invoking its handler record
    /// synchronously with a [`MenuItemEvent`].
    ///
    /// Returns `true` when an enabled item with that id exists, whether or
    /// not it carries a handler; items without handlers have no observable
    /// effect. Disabled or unknown ids return `false` and dispatch nothing.
    pub fn activate(&mut self, id: ItemId) -> bool {
        let Some(item) = self.item_mut(id) else {
            tracing::warn!(item = %id, "activation for unknown menu item");
            return false;
        };

        if !item.enabled {
            tracing::debug!(item = %id, "ignoring activation of disabled item");
            return false;
        }

        let event = MenuItemEvent {
            item_id: item.id,
            item_text: item.text.clone(),
        };

        tracing::debug!(item = %id, text = %event.item_text, "menu item activated");

        if let Some(handler) = item.handler.as_mut() {
            handler(&event);
        }
        true
    }

    /// Builds a handler-free copy of this menu for the platform shell.
    pub fn snapshot(&self) -> MenuSnapshot {
        let entries = self
            .entries
            .iter()
            .map(|e| match e {
                MenuEntry::Item(item) => EntrySnapshot::Item {
                    id: item.id,
                    text: item.text.clone(),
                    enabled: item.enabled,
                },
                MenuEntry::Separator => EntrySnapshot::Separator,
            })
            .collect();
        MenuSnapshot::new(entries)
    }
}
