//! Item identity and activation events.

use std::fmt;

/// Identifier of a menu item, unique within its owning [`Menu`](crate::Menu).
///
/// Ids are assigned monotonically per menu and never reused, even after the
/// item is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) u32);

impl ItemId {
    /// Returns the raw numeric id.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event delivered to an item's handler when the item is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemEvent {
    /// Id of the activated item.
    pub item_id: ItemId,
    /// Display text of the activated item.
    pub item_text: String,
}

/// Handler record stored per item and invoked on activation.
///
/// Handlers run synchronously on the thread that calls
/// [`Menu::activate`](crate::Menu::activate); no `Send` bound is required
/// since the whole menu model is confined to one UI-affine context.
pub type ItemHandler = Box<dyn FnMut(&MenuItemEvent) + 'static>;
