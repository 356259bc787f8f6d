//! Context-menu model for TrayKit.
//!
//! A [`Menu`] is an ordered sequence of entries — clickable items and
//! separators — where insertion order is display order. Each item may carry
//! a handler record that [`Menu::activate`] invokes synchronously with a
//! [`MenuItemEvent`], so application callbacks run without any platform
//! involvement and tests can drive activation directly.
//!
//! The menu never talks to the OS itself: the platform side receives a
//! handler-free [`MenuSnapshot`] and reports selections back by item id.

mod event;
mod menu;
mod snapshot;

pub use event::{ItemHandler, ItemId, MenuItemEvent};
pub use menu::{ItemHandle, Menu, MenuEntry, MenuItem};
pub use snapshot::{EntrySnapshot, MenuSnapshot};
