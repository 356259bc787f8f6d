//! Per-icon state record and lifecycle state machine.

use std::fmt;

use traykit_menu::Menu;

use crate::event::{ClickHandler, ClickKind};

/// Identifier of a tray icon, unique within the process.
///
/// Ids are assigned monotonically by the manager and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrayIconId(pub(crate) u32);

impl TrayIconId {
    /// Returns the raw numeric id.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TrayIconId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a tray icon.
///
/// Transitions: `Created → Shown ⇄ Hidden → Removed`. `Removed` is
/// terminal; operations on a removed icon fail with
/// [`TrayError::Removed`](crate::TrayError::Removed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    /// Freshly created, never shown.
    Created,
    /// Visible in the status area.
    Shown,
    /// Hidden after having been shown.
    Hidden,
    /// Destroyed; terminal.
    Removed,
}

/// On-screen geometry of a shown tray icon, as reported by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Click handler records, one slot per click kind.
#[derive(Default)]
pub(crate) struct ClickHandlers {
    left: Option<ClickHandler>,
    right: Option<ClickHandler>,
    double: Option<ClickHandler>,
}

impl ClickHandlers {
    fn slot_mut(&mut self, kind: ClickKind) -> &mut Option<ClickHandler> {
        match kind {
            ClickKind::Left => &mut self.left,
            ClickKind::Right => &mut self.right,
            ClickKind::Double => &mut self.double,
        }
    }
}

/// State record of a single tray icon, owned by the manager.
///
/// All mutation goes through [`TrayManager`](crate::TrayManager) so the
/// platform shell observes every change; this type only exposes reads.
pub struct TrayIcon {
    id: TrayIconId,
    title: String,
    tooltip: String,
    icon_image: Option<Vec<u8>>,
    state: IconState,
    bounds: Option<Bounds>,
    menu: Option<Menu>,
    handlers: ClickHandlers,
}

impl TrayIcon {
    pub(crate) fn new(id: TrayIconId) -> Self {
        Self {
            id,
            title: String::new(),
            tooltip: String::new(),
            icon_image: None,
            state: IconState::Created,
            bounds: None,
            menu: None,
            handlers: ClickHandlers::default(),
        }
    }

    /// Id of this icon, unique within the process.
    pub fn id(&self) -> TrayIconId {
        self.id
    }

    /// Current title text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current tooltip text.
    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Icon image bytes (PNG), if set.
    pub fn icon_image(&self) -> Option<&[u8]> {
        self.icon_image.as_deref()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> IconState {
        self.state
    }

    /// Whether the icon is currently shown.
    pub fn is_visible(&self) -> bool {
        self.state == IconState::Shown
    }

    /// On-screen geometry; absent until the icon has been successfully
    /// shown at least once.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// The attached context menu, if any.
    pub fn menu(&self) -> Option<&Menu> {
        self.menu.as_ref()
    }

    /// Whether a handler is registered for the given click kind.
    pub fn has_handler(&self, kind: ClickKind) -> bool {
        match kind {
            ClickKind::Left => self.handlers.left.is_some(),
            ClickKind::Right => self.handlers.right.is_some(),
            ClickKind::Double => self.handlers.double.is_some(),
        }
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_tooltip(&mut self, tooltip: String) {
        self.tooltip = tooltip;
    }

    pub(crate) fn set_icon_image(&mut self, png: Vec<u8>) {
        self.icon_image = Some(png);
    }

    /// Attaches a menu, replacing any previous one (last-set wins).
    pub(crate) fn set_menu(&mut self, menu: Menu) {
        self.menu = Some(menu);
    }

    pub(crate) fn menu_mut(&mut self) -> Option<&mut Menu> {
        self.menu.as_mut()
    }

    /// Stores a handler for the given kind, replacing any previous one.
    pub(crate) fn set_handler(&mut self, kind: ClickKind, handler: ClickHandler) {
        *self.handlers.slot_mut(kind) = Some(handler);
    }

    pub(crate) fn handler_mut(&mut self, kind: ClickKind) -> Option<&mut ClickHandler> {
        self.handlers.slot_mut(kind).as_mut()
    }

    pub(crate) fn mark_shown(&mut self, bounds: Bounds) {
        self.state = IconState::Shown;
        self.bounds = Some(bounds);
    }

    pub(crate) fn mark_hidden(&mut self) {
        self.state = IconState::Hidden;
    }

    /// Terminal transition; drops the menu and handler records.
    pub(crate) fn mark_removed(&mut self) {
        self.state = IconState::Removed;
        self.menu = None;
        self.handlers = ClickHandlers::default();
    }
}

impl fmt::Debug for TrayIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrayIcon")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("tooltip", &self.tooltip)
            .field("state", &self.state)
            .field("bounds", &self.bounds)
            .field("has_menu", &self.menu.is_some())
            .finish()
    }
}
