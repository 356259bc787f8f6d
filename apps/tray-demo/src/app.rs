//! Demo session — builds the tray icon and its context menu, then plays a
//! scripted user session against the headless shell.

use std::cell::Cell;
use std::rc::Rc;

use traykit_menu::Menu;
use traykit_tray::{ClickKind, HeadlessShell, TrayManager, platform_tray_supported};

use crate::config::Config;

/// Runs the demo session to completion.
pub fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        host_has_tray = platform_tray_supported(),
        "using headless shell"
    );

    let shell = HeadlessShell::new();
    let driver = shell.driver();
    let mut tray = TrayManager::new(Box::new(shell));

    // Check if the system tray is supported before anything else.
    if !tray.is_supported() {
        tracing::error!("system tray is not supported on this platform");
        return Ok(());
    }
    tracing::info!("system tray is supported");

    let icon = tray.create_icon()?;
    tracing::info!(icon = %icon, "tray icon created");

    tray.set_title(icon, &config.name)?;
    tray.set_tooltip(icon, &config.tooltip)?;
    tracing::info!("tray icon configured");

    // Build the context menu.
    let quit_requested = Rc::new(Cell::new(false));
    let mut menu = Menu::new();

    let show_item = menu.add_item_with("Show Window", |e| {
        tracing::info!(item = %e.item_id, text = %e.item_text, "show window requested");
    });
    tracing::info!(item = %show_item.id, "created 'Show Window' menu item");

    menu.add_separator();

    let about_item = menu.add_item_with("About", |e| {
        tracing::info!(item = %e.item_id, text = %e.item_text, "TrayKit demo v0.1");
    });
    tracing::info!(item = %about_item.id, "created 'About' menu item");

    let settings_item = menu.add_item_with("Settings", |e| {
        tracing::info!(item = %e.item_id, text = %e.item_text, "opening settings panel");
    });
    tracing::info!(item = %settings_item.id, "created 'Settings' menu item");

    menu.add_separator();

    let quit_flag = Rc::clone(&quit_requested);
    let quit_item = menu.add_item_with("Quit", move |e| {
        tracing::info!(item = %e.item_id, text = %e.item_text, "quit requested");
        quit_flag.set(true);
    });
    tracing::info!(item = %quit_item.id, "created 'Quit' menu item");

    tray.set_context_menu(icon, menu)?;
    tracing::info!("context menu attached");

    // Click handlers.
    tray.on_left_click(icon, |e| {
        tracing::info!(icon = %e.tray_icon_id, "tray icon left clicked");
    })?;
    tray.on_right_click(icon, |e| {
        tracing::info!(icon = %e.tray_icon_id, "tray icon right clicked");
    })?;
    tray.on_double_click(icon, |e| {
        tracing::info!(icon = %e.tray_icon_id, "tray icon double clicked");
    })?;
    tracing::info!("click handlers configured");

    if config.show_on_start {
        tray.show(icon)?;
        let state = tray.icon(icon);
        tracing::info!(
            visible = state.is_some_and(|s| s.is_visible()),
            "tray icon shown"
        );
        if let Some(bounds) = state.and_then(|s| s.bounds()) {
            tracing::info!(
                x = bounds.x,
                y = bounds.y,
                width = bounds.width,
                height = bounds.height,
                "tray icon bounds"
            );
        }
    }

    // Scripted user session: a few clicks, a menu browse, then quit.
    driver.click(icon, ClickKind::Left);
    driver.click(icon, ClickKind::Right);
    driver.select_item(icon, about_item.id);
    driver.click(icon, ClickKind::Double);
    driver.click(icon, ClickKind::Right);
    driver.select_item(icon, quit_item.id);

    // Drain the session; handlers run synchronously inside pump.
    while tray.pump() > 0 {
        if quit_requested.get() {
            break;
        }
    }

    if quit_requested.get() {
        tracing::info!("quit requested via tray menu");
    }

    tray.remove(icon)?;
    tracing::info!("tray icon removed, session over");
    Ok(())
}
