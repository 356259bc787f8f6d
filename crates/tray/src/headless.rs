//! In-process shell implementation for tests and demos.
//!
//! [`HeadlessShell`] keeps every OS-side effect as plain recorded state:
//! titles, tooltips, menu snapshots, visibility, and the menus it "opened"
//! on right-click. A [`HeadlessDriver`] obtained from the same shell plays
//! the role of the user, injecting clicks and menu selections that arrive
//! at the manager through the regular event channel.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};

use traykit_menu::MenuSnapshot;

use crate::error::TrayError;
use crate::event::{ClickKind, ShellEvent};
use crate::icon::{Bounds, TrayIconId};
use crate::shell::Shell;

/// Synthetic icon size used for reported bounds.
const ICON_EDGE: u32 = 24;

#[derive(Default)]
struct IconRecord {
    title: String,
    tooltip: String,
    icon_image: Option<Vec<u8>>,
    menu: Option<MenuSnapshot>,
    visible: bool,
}

#[derive(Default)]
struct State {
    supported: bool,
    deny_next_create: bool,
    deny_next_show: bool,
    events: Option<mpsc::Sender<ShellEvent>>,
    icons: BTreeMap<TrayIconId, IconRecord>,
    opened_menus: Vec<(TrayIconId, MenuSnapshot)>,
}

fn lock(inner: &Arc<Mutex<State>>) -> MutexGuard<'_, State> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Tray shell that records everything instead of talking to an OS.
pub struct HeadlessShell {
    inner: Arc<Mutex<State>>,
}

impl HeadlessShell {
    /// Creates a shell that reports tray support.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                supported: true,
                ..State::default()
            })),
        }
    }

    /// Creates a shell that reports no tray support, as on platforms
    /// without a status area.
    pub fn unsupported() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Returns a driver sharing this shell's state, usable after the shell
    /// itself has been boxed into a manager.
    pub fn driver(&self) -> HeadlessDriver {
        HeadlessDriver {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for HeadlessShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for HeadlessShell {
    fn is_supported(&self) -> bool {
        lock(&self.inner).supported
    }

    fn connect(&mut self, events: mpsc::Sender<ShellEvent>) {
        lock(&self.inner).events = Some(events);
    }

    fn create_icon(&mut self, id: TrayIconId) -> Result<(), TrayError> {
        let mut state = lock(&self.inner);
        if !state.supported {
            return Err(TrayError::Unsupported);
        }
        if state.deny_next_create {
            state.deny_next_create = false;
            return Err(TrayError::CreationFailed("icon allocation denied".into()));
        }
        state.icons.insert(id, IconRecord::default());
        Ok(())
    }

    fn set_title(&mut self, id: TrayIconId, title: &str) {
        if let Some(icon) = lock(&self.inner).icons.get_mut(&id) {
            icon.title = title.to_string();
        }
    }

    fn set_tooltip(&mut self, id: TrayIconId, tooltip: &str) {
        if let Some(icon) = lock(&self.inner).icons.get_mut(&id) {
            icon.tooltip = tooltip.to_string();
        }
    }

    fn set_icon_image(&mut self, id: TrayIconId, png: &[u8]) {
        if let Some(icon) = lock(&self.inner).icons.get_mut(&id) {
            icon.icon_image = Some(png.to_vec());
        }
    }

    fn set_menu(&mut self, id: TrayIconId, menu: MenuSnapshot) {
        if let Some(icon) = lock(&self.inner).icons.get_mut(&id) {
            icon.menu = Some(menu);
        }
    }

    fn show(&mut self, id: TrayIconId) -> Result<Bounds, TrayError> {
        let mut state = lock(&self.inner);
        if state.deny_next_show {
            state.deny_next_show = false;
            return Err(TrayError::ShowFailed("status area refused the icon".into()));
        }
        let Some(icon) = state.icons.get_mut(&id) else {
            return Err(TrayError::ShowFailed(format!("no shell icon for id {id}")));
        };
        icon.visible = true;

        // Synthetic geometry: icons line up in a strip, newest leftmost.
        Ok(Bounds {
            x: (id.raw() * ICON_EDGE) as i32,
            y: 0,
            width: ICON_EDGE,
            height: ICON_EDGE,
        })
    }

    fn hide(&mut self, id: TrayIconId) {
        if let Some(icon) = lock(&self.inner).icons.get_mut(&id) {
            icon.visible = false;
        }
    }

    fn destroy(&mut self, id: TrayIconId) {
        lock(&self.inner).icons.remove(&id);
    }
}

/// Simulates user input against a [`HeadlessShell`] and inspects its
/// recorded state.
#[derive(Clone)]
pub struct HeadlessDriver {
    inner: Arc<Mutex<State>>,
}

impl HeadlessDriver {
    /// Simulates a physical click on a visible icon.
    ///
    /// A right-click also opens (records) the currently attached menu, per
    /// OS convention, whether or not a handler is registered. Returns
    /// `false` when the icon does not exist or is not visible, in which
    /// case nothing is delivered.
    pub fn click(&self, id: TrayIconId, kind: ClickKind) -> bool {
        let mut state = lock(&self.inner);
        let menu_to_open = match state.icons.get(&id) {
            None => return false,
            Some(icon) if !icon.visible => return false,
            Some(icon) if kind == ClickKind::Right => icon.menu.clone(),
            Some(_) => None,
        };
        if let Some(menu) = menu_to_open {
            state.opened_menus.push((id, menu));
        }
        Self::deliver(&state, ShellEvent::IconClicked { id, kind })
    }

    /// Simulates selection of a menu item on a visible icon.
    ///
    /// Returns `false` when the icon is missing, hidden, or its attached
    /// menu does not contain the item.
    pub fn select_item(&self, id: TrayIconId, item_id: traykit_menu::ItemId) -> bool {
        let state = lock(&self.inner);
        let Some(icon) = state.icons.get(&id) else {
            return false;
        };
        if !icon.visible {
            return false;
        }
        let has_item = icon.menu.as_ref().is_some_and(|m| m.contains_item(item_id));
        if !has_item {
            return false;
        }
        Self::deliver(&state, ShellEvent::MenuItemSelected { id, item_id })
    }

    fn deliver(state: &State, event: ShellEvent) -> bool {
        match &state.events {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }

    /// Makes the shell deny the next icon creation.
    pub fn deny_next_create(&self) {
        lock(&self.inner).deny_next_create = true;
    }

    /// Makes the shell refuse the next show.
    pub fn deny_next_show(&self) {
        lock(&self.inner).deny_next_show = true;
    }

    /// Whether the shell holds an icon for this id.
    pub fn icon_exists(&self, id: TrayIconId) -> bool {
        lock(&self.inner).icons.contains_key(&id)
    }

    /// Visibility as the shell sees it.
    pub fn is_visible(&self, id: TrayIconId) -> bool {
        lock(&self.inner)
            .icons
            .get(&id)
            .is_some_and(|i| i.visible)
    }

    /// Title as the shell sees it.
    pub fn title_of(&self, id: TrayIconId) -> Option<String> {
        lock(&self.inner).icons.get(&id).map(|i| i.title.clone())
    }

    /// Tooltip as the shell sees it.
    pub fn tooltip_of(&self, id: TrayIconId) -> Option<String> {
        lock(&self.inner).icons.get(&id).map(|i| i.tooltip.clone())
    }

    /// Icon image bytes (PNG) as the shell sees them.
    pub fn icon_image_of(&self, id: TrayIconId) -> Option<Vec<u8>> {
        lock(&self.inner)
            .icons
            .get(&id)
            .and_then(|i| i.icon_image.clone())
    }

    /// Menu snapshot currently attached to the icon, if any.
    pub fn menu_of(&self, id: TrayIconId) -> Option<MenuSnapshot> {
        lock(&self.inner).icons.get(&id).and_then(|i| i.menu.clone())
    }

    /// The menu most recently opened by a right-click on this icon.
    pub fn last_opened_menu(&self, id: TrayIconId) -> Option<MenuSnapshot> {
        lock(&self.inner)
            .opened_menus
            .iter()
            .rev()
            .find(|(i, _)| *i == id)
            .map(|(_, m)| m.clone())
    }

    /// Number of menus opened by right-clicks so far.
    pub fn opened_menu_count(&self) -> usize {
        lock(&self.inner).opened_menus.len()
    }
}
