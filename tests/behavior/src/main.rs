fn main() {
    println!("Run `cargo test -p behavior` to execute the end-to-end tray scenarios.");
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use traykit_menu::{Menu, MenuItemEvent};
    use traykit_tray::{
        ClickKind, HeadlessDriver, HeadlessShell, IconState, TrayError, TrayManager,
    };

    /// Builds a manager over a headless shell plus the driver that plays
    /// the user.
    fn tray() -> (TrayManager, HeadlessDriver) {
        let shell = HeadlessShell::new();
        let driver = shell.driver();
        (TrayManager::new(Box::new(shell)), driver)
    }

    #[test]
    fn no_tray_shell_means_no_icons() {
        let mut tray = TrayManager::new(Box::new(HeadlessShell::unsupported()));
        assert!(!tray.is_supported());
        assert_eq!(tray.create_icon(), Err(TrayError::Unsupported));
    }

    #[test]
    fn every_icon_gets_its_own_id() {
        let (mut tray, _driver) = tray();
        let mut seen = Vec::new();
        for _ in 0..8 {
            let id = tray.create_icon().unwrap();
            assert!(!seen.contains(&id), "id {id} issued twice");
            seen.push(id);
        }
    }

    #[test]
    fn menu_ids_unique_and_ordered() {
        let mut menu = Menu::new();
        let a = menu.add_item("Open");
        menu.add_separator();
        let b = menu.add_item("Settings");
        let c = menu.add_item("Quit");

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);

        let texts: Vec<_> = menu.items().map(|i| i.text().to_string()).collect();
        assert_eq!(texts, ["Open", "Settings", "Quit"]);
        assert_eq!(menu.snapshot().item_texts(), ["Open", "Settings", "Quit"]);
    }

    #[test]
    fn bounds_appear_exactly_when_show_succeeds() {
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();
        assert!(tray.icon(icon).unwrap().bounds().is_none());

        driver.deny_next_show();
        assert!(matches!(tray.show(icon), Err(TrayError::ShowFailed(_))));
        assert!(tray.icon(icon).unwrap().bounds().is_none());

        tray.show(icon).unwrap();
        assert!(tray.icon(icon).unwrap().bounds().is_some());
    }

    #[test]
    fn latest_click_handler_wins() {
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();
        tray.show(icon).unwrap();

        let first = Rc::new(RefCell::new(0u32));
        let second = Rc::new(RefCell::new(0u32));

        let count = Rc::clone(&first);
        tray.on_left_click(icon, move |_| *count.borrow_mut() += 1)
            .unwrap();
        let count = Rc::clone(&second);
        tray.on_left_click(icon, move |_| *count.borrow_mut() += 1)
            .unwrap();

        assert!(driver.click(icon, ClickKind::Left));
        tray.pump();

        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn selecting_b_fires_only_b() {
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();

        let fired: Rc<RefCell<Vec<MenuItemEvent>>> = Rc::new(RefCell::new(Vec::new()));

        let mut menu = Menu::new();
        let log = Rc::clone(&fired);
        let a = menu.add_item_with("A", move |e| log.borrow_mut().push(e.clone()));
        menu.add_separator();
        let log = Rc::clone(&fired);
        let b = menu.add_item_with("B", move |e| log.borrow_mut().push(e.clone()));

        tray.set_context_menu(icon, menu).unwrap();
        tray.show(icon).unwrap();

        assert!(driver.select_item(icon, b.id));
        tray.pump();

        let events = fired.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].item_id, b.id);
        assert_eq!(events[0].item_text, "B");
        assert_ne!(events[0].item_id, a.id);
    }

    #[test]
    fn right_click_shows_only_the_latest_menu() {
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();

        let mut menu_x = Menu::new();
        menu_x.add_item("X-only");
        tray.set_context_menu(icon, menu_x).unwrap();

        let mut menu_y = Menu::new();
        menu_y.add_item("Y-first");
        menu_y.add_item("Y-second");
        tray.set_context_menu(icon, menu_y).unwrap();

        tray.show(icon).unwrap();
        assert!(driver.click(icon, ClickKind::Right));
        tray.pump();

        let opened = driver.last_opened_menu(icon).unwrap();
        assert_eq!(opened.item_texts(), ["Y-first", "Y-second"]);
    }

    #[test]
    fn menu_opens_without_a_right_click_handler() {
        // The shell displays the menu on right-click regardless of handler
        // registration.
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();

        let mut menu = Menu::new();
        menu.add_item("Quit");
        tray.set_context_menu(icon, menu).unwrap();
        tray.show(icon).unwrap();

        assert!(driver.click(icon, ClickKind::Right));
        assert_eq!(driver.opened_menu_count(), 1);
    }

    #[test]
    fn full_lifecycle() {
        let (mut tray, driver) = tray();
        let icon = tray.create_icon().unwrap();
        assert_eq!(tray.icon(icon).unwrap().state(), IconState::Created);

        tray.set_title(icon, "Demo").unwrap();
        tray.show(icon).unwrap();
        assert_eq!(tray.icon(icon).unwrap().state(), IconState::Shown);
        assert!(driver.is_visible(icon));

        tray.hide(icon).unwrap();
        assert_eq!(tray.icon(icon).unwrap().state(), IconState::Hidden);

        tray.show(icon).unwrap();
        tray.remove(icon).unwrap();
        assert_eq!(tray.icon(icon).unwrap().state(), IconState::Removed);
        assert_eq!(tray.show(icon), Err(TrayError::Removed(icon)));
        assert!(!driver.icon_exists(icon));

        // A fresh icon still gets a never-before-seen id.
        let next = tray.create_icon().unwrap();
        assert_ne!(next, icon);
    }
}
