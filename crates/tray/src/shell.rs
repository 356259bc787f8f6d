//! The platform shell boundary.

use std::sync::mpsc;

use traykit_menu::MenuSnapshot;

use crate::error::TrayError;
use crate::event::ShellEvent;
use crate::icon::{Bounds, TrayIconId};

/// Seam to the platform's native tray/menu API.
///
/// A shell owns the OS-side resources keyed by [`TrayIconId`] and reports
/// user input through the channel handed to [`Shell::connect`]. Menus cross
/// the boundary as handler-free [`MenuSnapshot`]s; the shell reports
/// selections back by item id and never sees application callbacks.
///
/// On right-click the shell is expected to open the attached menu itself,
/// per OS convention, independent of any handler registration on the
/// manager side.
pub trait Shell {
    /// Whether this platform exposes a tray shell. Pure query, no side
    /// effects; must be consulted before any other operation.
    fn is_supported(&self) -> bool;

    /// Installs the sender the shell uses to deliver input events.
    fn connect(&mut self, events: mpsc::Sender<ShellEvent>);

    /// Allocates the OS-side resources for a new icon.
    fn create_icon(&mut self, id: TrayIconId) -> Result<(), TrayError>;

    /// Updates the title shown next to the icon, effective immediately when
    /// the icon is visible.
    fn set_title(&mut self, id: TrayIconId, title: &str);

    /// Updates the hover tooltip.
    fn set_tooltip(&mut self, id: TrayIconId, tooltip: &str);

    /// Updates the icon image (PNG bytes).
    fn set_icon_image(&mut self, id: TrayIconId, png: &[u8]);

    /// Replaces the context menu displayed on right-click.
    fn set_menu(&mut self, id: TrayIconId, menu: MenuSnapshot);

    /// Makes the icon visible, returning its OS-reported geometry.
    fn show(&mut self, id: TrayIconId) -> Result<Bounds, TrayError>;

    /// Hides the icon without destroying it.
    fn hide(&mut self, id: TrayIconId);

    /// Destroys the OS-side resources; the id is dead afterwards.
    fn destroy(&mut self, id: TrayIconId);
}
