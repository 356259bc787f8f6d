//! Click events and the shell-to-manager event feed.

use traykit_menu::ItemId;

use crate::icon::TrayIconId;

/// Kind of physical click on a tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickKind {
    Left,
    Right,
    Double,
}

/// Event delivered to a registered click handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Icon the click landed on.
    pub tray_icon_id: TrayIconId,
    /// Which kind of click occurred.
    pub kind: ClickKind,
}

/// Handler record stored per icon and click kind, invoked synchronously on
/// dispatch. Re-registration replaces the previous record (last-write-wins).
pub type ClickHandler = Box<dyn FnMut(&ClickEvent) + 'static>;

/// Input events reported by the platform shell.
///
/// The shell side may live on a platform thread; events cross over on a
/// channel and are dispatched serially by [`TrayManager::pump`] on the
/// UI-affine thread, so no two handlers for the same icon ever run
/// concurrently.
///
/// [`TrayManager::pump`]: crate::TrayManager::pump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// A physical click landed on a tray icon.
    IconClicked { id: TrayIconId, kind: ClickKind },
    /// An entry of the icon's context menu was selected.
    MenuItemSelected { id: TrayIconId, item_id: ItemId },
}
