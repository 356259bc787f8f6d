//! Tray icon registry, factory and event dispatch.

use std::collections::BTreeMap;
use std::sync::mpsc;

use traykit_menu::Menu;

use crate::error::TrayError;
use crate::event::{ClickEvent, ClickKind, ShellEvent};
use crate::icon::{IconState, TrayIcon, TrayIconId};
use crate::shell::Shell;

/// Explicitly constructed registry of tray icons.
///
/// The manager owns every [`TrayIcon`] record and the shell that backs
/// them; all mutation flows through it so the shell observes each change.
/// It also owns the receiving side of the shell event channel: call
/// [`pump`](Self::pump) from the UI-affine thread to drain pending input
/// and run handlers, or [`dispatch`](Self::dispatch) to inject a single
/// event directly (handy in tests).
pub struct TrayManager {
    shell: Box<dyn Shell>,
    events: mpsc::Receiver<ShellEvent>,
    icons: BTreeMap<TrayIconId, TrayIcon>,
    next_id: u32,
}

/// Looks up a live icon, distinguishing removed from never-issued ids.
fn live_icon_mut<'a>(
    icons: &'a mut BTreeMap<TrayIconId, TrayIcon>,
    id: TrayIconId,
) -> Result<&'a mut TrayIcon, TrayError> {
    match icons.get_mut(&id) {
        None => Err(TrayError::UnknownIcon(id)),
        Some(icon) if icon.state() == IconState::Removed => Err(TrayError::Removed(id)),
        Some(icon) => Ok(icon),
    }
}

impl TrayManager {
    /// Creates a manager backed by the given shell.
    pub fn new(mut shell: Box<dyn Shell>) -> Self {
        let (tx, rx) = mpsc::channel();
        shell.connect(tx);
        Self {
            shell,
            events: rx,
            icons: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Whether the platform exposes a tray shell. Pure query; consult it
    /// before creating icons.
    pub fn is_supported(&self) -> bool {
        self.shell.is_supported()
    }

    /// Creates a new tray icon with a fresh process-unique id.
    ///
    /// The icon starts with empty title and tooltip, not visible, no
    /// bounds, no menu. Errors with [`TrayError::Unsupported`] when the
    /// platform lacks a tray shell and [`TrayError::CreationFailed`] when
    /// the shell denies the allocation.
    pub fn create_icon(&mut self) -> Result<TrayIconId, TrayError> {
        if !self.shell.is_supported() {
            return Err(TrayError::Unsupported);
        }

        let id = TrayIconId(self.next_id);
        self.shell.create_icon(id)?;
        self.next_id += 1;

        self.icons.insert(id, TrayIcon::new(id));
        tracing::debug!(icon = %id, "tray icon created");
        Ok(id)
    }

    /// Looks up an icon's state record, removed icons included.
    pub fn icon(&self, id: TrayIconId) -> Option<&TrayIcon> {
        self.icons.get(&id)
    }

    /// Sets the title shown next to the icon, effective immediately when
    /// shown.
    pub fn set_title(&mut self, id: TrayIconId, title: impl Into<String>) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        let title = title.into();
        self.shell.set_title(id, &title);
        icon.set_title(title);
        Ok(())
    }

    /// Sets the hover tooltip, effective immediately when shown.
    pub fn set_tooltip(
        &mut self,
        id: TrayIconId,
        tooltip: impl Into<String>,
    ) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        let tooltip = tooltip.into();
        self.shell.set_tooltip(id, &tooltip);
        icon.set_tooltip(tooltip);
        Ok(())
    }

    /// Sets the icon image (PNG bytes).
    pub fn set_icon_image(&mut self, id: TrayIconId, png: Vec<u8>) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        self.shell.set_icon_image(id, &png);
        icon.set_icon_image(png);
        Ok(())
    }

    /// Attaches a context menu, replacing any previously attached one.
    ///
    /// The shell receives a handler-free snapshot of the new menu; already
    /// dispatched events are unaffected.
    pub fn set_context_menu(&mut self, id: TrayIconId, menu: Menu) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        self.shell.set_menu(id, menu.snapshot());
        icon.set_menu(menu);
        Ok(())
    }

    /// Registers the left-click handler, replacing any previous one.
    pub fn on_left_click(
        &mut self,
        id: TrayIconId,
        handler: impl FnMut(&ClickEvent) + 'static,
    ) -> Result<(), TrayError> {
        self.set_click_handler(id, ClickKind::Left, handler)
    }

    /// Registers the right-click handler, replacing any previous one.
    ///
    /// The shell opens the attached context menu on right-click regardless
    /// of whether a handler is registered here.
    pub fn on_right_click(
        &mut self,
        id: TrayIconId,
        handler: impl FnMut(&ClickEvent) + 'static,
    ) -> Result<(), TrayError> {
        self.set_click_handler(id, ClickKind::Right, handler)
    }

    /// Registers the double-click handler, replacing any previous one.
    pub fn on_double_click(
        &mut self,
        id: TrayIconId,
        handler: impl FnMut(&ClickEvent) + 'static,
    ) -> Result<(), TrayError> {
        self.set_click_handler(id, ClickKind::Double, handler)
    }

    /// Registers the handler for the given click kind (last-write-wins).
    pub fn set_click_handler(
        &mut self,
        id: TrayIconId,
        kind: ClickKind,
        handler: impl FnMut(&ClickEvent) + 'static,
    ) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        icon.set_handler(kind, Box::new(handler));
        Ok(())
    }

    /// Makes the icon visible: `Created | Hidden → Shown`.
    ///
    /// On success the icon's bounds are populated from the shell-reported
    /// geometry. Showing an already-shown icon is an idempotent no-op. On
    /// [`TrayError::ShowFailed`] the state is unchanged.
    pub fn show(&mut self, id: TrayIconId) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        if icon.state() == IconState::Shown {
            return Ok(());
        }

        let bounds = self.shell.show(id)?;
        icon.mark_shown(bounds);
        tracing::debug!(icon = %id, ?bounds, "tray icon shown");
        Ok(())
    }

    /// Hides a shown icon: `Shown → Hidden`. No-op in any other live state.
    pub fn hide(&mut self, id: TrayIconId) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        if icon.state() != IconState::Shown {
            return Ok(());
        }

        self.shell.hide(id);
        icon.mark_hidden();
        tracing::debug!(icon = %id, "tray icon hidden");
        Ok(())
    }

    /// Destroys the icon: any live state → `Removed` (terminal).
    ///
    /// The menu and handler records are dropped. The record itself is kept
    /// so later operations on the id fail with [`TrayError::Removed`]
    /// rather than [`TrayError::UnknownIcon`].
    pub fn remove(&mut self, id: TrayIconId) -> Result<(), TrayError> {
        let icon = live_icon_mut(&mut self.icons, id)?;
        self.shell.destroy(id);
        icon.mark_removed();
        tracing::debug!(icon = %id, "tray icon removed");
        Ok(())
    }

    /// Drains all queued shell events through [`dispatch`](Self::dispatch).
    ///
    /// Returns the number of events dispatched. Call from the UI-affine
    /// thread; handlers run synchronously inside this call.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    /// Routes one shell event to the matching handler record.
    ///
    /// Clicks invoke the icon's handler for that kind, if any; menu
    /// selections activate the item in the icon's attached menu. Events
    /// for removed or unknown icons are dropped with a log line.
    pub fn dispatch(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::IconClicked { id, kind } => {
                let Ok(icon) = live_icon_mut(&mut self.icons, id) else {
                    tracing::warn!(icon = %id, "dropping click for dead icon");
                    return;
                };

                let click = ClickEvent {
                    tray_icon_id: id,
                    kind,
                };
                tracing::debug!(icon = %id, ?kind, "tray icon clicked");

                if let Some(handler) = icon.handler_mut(kind) {
                    handler(&click);
                }
            }
            ShellEvent::MenuItemSelected { id, item_id } => {
                let Ok(icon) = live_icon_mut(&mut self.icons, id) else {
                    tracing::warn!(icon = %id, "dropping menu selection for dead icon");
                    return;
                };

                match icon.menu_mut() {
                    Some(menu) => {
                        menu.activate(item_id);
                    }
                    None => {
                        tracing::warn!(icon = %id, item = %item_id, "menu selection without an attached menu");
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for TrayManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrayManager")
            .field("icons", &self.icons)
            .field("supported", &self.shell.is_supported())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::headless::{HeadlessDriver, HeadlessShell};

    fn manager() -> (TrayManager, HeadlessDriver) {
        let shell = HeadlessShell::new();
        let driver = shell.driver();
        (TrayManager::new(Box::new(shell)), driver)
    }

    #[test]
    fn unsupported_platform_cannot_create() {
        let mut mgr = TrayManager::new(Box::new(HeadlessShell::unsupported()));
        assert!(!mgr.is_supported());
        assert_eq!(mgr.create_icon(), Err(TrayError::Unsupported));
    }

    #[test]
    fn icons_get_distinct_ids() {
        let (mut mgr, _driver) = manager();
        let a = mgr.create_icon().unwrap();
        let b = mgr.create_icon().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn creation_failure_does_not_burn_an_id() {
        let (mut mgr, driver) = manager();

        driver.deny_next_create();
        assert!(matches!(
            mgr.create_icon(),
            Err(TrayError::CreationFailed(_))
        ));

        let id = mgr.create_icon().unwrap();
        assert!(mgr.icon(id).is_some());
    }

    #[test]
    fn new_icon_defaults() {
        let (mut mgr, _driver) = manager();
        let id = mgr.create_icon().unwrap();

        let icon = mgr.icon(id).unwrap();
        assert_eq!(icon.state(), IconState::Created);
        assert!(icon.title().is_empty());
        assert!(icon.tooltip().is_empty());
        assert!(icon.bounds().is_none());
        assert!(icon.menu().is_none());
    }

    #[test]
    fn title_and_tooltip_reach_the_shell() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        mgr.set_title(id, "Demo").unwrap();
        mgr.set_tooltip(id, "Demo tooltip").unwrap();

        assert_eq!(mgr.icon(id).unwrap().title(), "Demo");
        assert_eq!(driver.title_of(id).as_deref(), Some("Demo"));
        assert_eq!(driver.tooltip_of(id).as_deref(), Some("Demo tooltip"));
    }

    #[test]
    fn icon_image_reaches_the_shell() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();
        assert!(mgr.icon(id).unwrap().icon_image().is_none());

        let png = vec![0x89, b'P', b'N', b'G'];
        mgr.set_icon_image(id, png.clone()).unwrap();

        assert_eq!(mgr.icon(id).unwrap().icon_image(), Some(png.as_slice()));
        assert_eq!(driver.icon_image_of(id), Some(png));
    }

    #[test]
    fn bounds_present_iff_shown() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();
        assert!(mgr.icon(id).unwrap().bounds().is_none());

        driver.deny_next_show();
        assert!(matches!(mgr.show(id), Err(TrayError::ShowFailed(_))));
        assert!(mgr.icon(id).unwrap().bounds().is_none());
        assert_eq!(mgr.icon(id).unwrap().state(), IconState::Created);

        mgr.show(id).unwrap();
        assert!(mgr.icon(id).unwrap().bounds().is_some());
        assert!(mgr.icon(id).unwrap().is_visible());
    }

    #[test]
    fn show_is_idempotent() {
        let (mut mgr, _driver) = manager();
        let id = mgr.create_icon().unwrap();

        mgr.show(id).unwrap();
        let bounds = mgr.icon(id).unwrap().bounds();
        mgr.show(id).unwrap();
        assert_eq!(mgr.icon(id).unwrap().bounds(), bounds);
    }

    #[test]
    fn hide_and_reshow() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        // Hiding a never-shown icon is a no-op.
        mgr.hide(id).unwrap();
        assert_eq!(mgr.icon(id).unwrap().state(), IconState::Created);

        mgr.show(id).unwrap();
        mgr.hide(id).unwrap();
        assert_eq!(mgr.icon(id).unwrap().state(), IconState::Hidden);
        assert!(!driver.is_visible(id));

        mgr.show(id).unwrap();
        assert_eq!(mgr.icon(id).unwrap().state(), IconState::Shown);
    }

    #[test]
    fn removed_icon_rejects_operations() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();
        mgr.show(id).unwrap();

        mgr.remove(id).unwrap();
        assert_eq!(mgr.icon(id).unwrap().state(), IconState::Removed);
        assert!(!driver.icon_exists(id));

        assert_eq!(mgr.set_title(id, "x"), Err(TrayError::Removed(id)));
        assert_eq!(mgr.show(id), Err(TrayError::Removed(id)));
        assert_eq!(mgr.remove(id), Err(TrayError::Removed(id)));
    }

    #[test]
    fn unknown_id_is_distinguished_from_removed() {
        let (mut mgr, _driver) = manager();
        let ghost = TrayIconId(99);
        assert_eq!(mgr.set_title(ghost, "x"), Err(TrayError::UnknownIcon(ghost)));
    }

    #[test]
    fn click_dispatch_reaches_registered_handler() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        mgr.on_left_click(id, move |e| log.borrow_mut().push(*e)).unwrap();
        mgr.show(id).unwrap();

        assert!(driver.click(id, ClickKind::Left));
        assert_eq!(mgr.pump(), 1);

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tray_icon_id, id);
        assert_eq!(events[0].kind, ClickKind::Left);
    }

    #[test]
    fn handler_reregistration_replaces_previous() {
        let (mut mgr, _driver) = manager();
        let id = mgr.create_icon().unwrap();

        let first = Rc::new(RefCell::new(0u32));
        let second = Rc::new(RefCell::new(0u32));

        let count = Rc::clone(&first);
        mgr.on_left_click(id, move |_| *count.borrow_mut() += 1).unwrap();
        let count = Rc::clone(&second);
        mgr.on_left_click(id, move |_| *count.borrow_mut() += 1).unwrap();

        mgr.dispatch(ShellEvent::IconClicked {
            id,
            kind: ClickKind::Left,
        });

        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn click_without_handler_is_silent() {
        let (mut mgr, _driver) = manager();
        let id = mgr.create_icon().unwrap();
        mgr.dispatch(ShellEvent::IconClicked {
            id,
            kind: ClickKind::Double,
        });
    }

    #[test]
    fn menu_selection_activates_the_item() {
        let (mut mgr, _driver) = manager();
        let id = mgr.create_icon().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut menu = Menu::new();
        let log = Rc::clone(&seen);
        let about = menu.add_item_with("About", move |e| log.borrow_mut().push(e.clone()));
        mgr.set_context_menu(id, menu).unwrap();

        mgr.dispatch(ShellEvent::MenuItemSelected {
            id,
            item_id: about.id,
        });

        let events = seen.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].item_text, "About");
    }

    #[test]
    fn replacing_menu_updates_shell_snapshot() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        let mut first = Menu::new();
        first.add_item("Old");
        mgr.set_context_menu(id, first).unwrap();

        let mut second = Menu::new();
        second.add_item("New");
        mgr.set_context_menu(id, second).unwrap();

        assert_eq!(driver.menu_of(id).unwrap().item_texts(), ["New"]);
        assert_eq!(
            mgr.icon(id).unwrap().menu().unwrap().items().count(),
            1
        );
    }

    #[test]
    fn events_for_removed_icons_are_dropped() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        let seen = Rc::new(RefCell::new(0u32));
        let count = Rc::clone(&seen);
        mgr.on_left_click(id, move |_| *count.borrow_mut() += 1).unwrap();
        mgr.show(id).unwrap();

        assert!(driver.click(id, ClickKind::Left));
        mgr.remove(id).unwrap();

        // The click was queued before removal; dispatch must drop it.
        assert_eq!(mgr.pump(), 1);
        assert_eq!(*seen.borrow(), 0);
    }

    #[test]
    fn pump_drains_everything_in_order() {
        let (mut mgr, driver) = manager();
        let id = mgr.create_icon().unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        mgr.set_click_handler(id, ClickKind::Left, move |e| log.borrow_mut().push(e.kind))
            .unwrap();
        let log = Rc::clone(&seen);
        mgr.set_click_handler(id, ClickKind::Double, move |e| log.borrow_mut().push(e.kind))
            .unwrap();
        mgr.show(id).unwrap();

        driver.click(id, ClickKind::Left);
        driver.click(id, ClickKind::Double);
        driver.click(id, ClickKind::Left);

        assert_eq!(mgr.pump(), 3);
        assert_eq!(
            *seen.borrow(),
            [ClickKind::Left, ClickKind::Double, ClickKind::Left]
        );
        assert_eq!(mgr.pump(), 0);
    }
}
