//! Platform capability probe.

/// Returns whether the current platform exposes a system tray shell.
///
/// This is the answer a native shell implementation should report from
/// [`Shell::is_supported`](crate::Shell::is_supported):
/// - Windows and macOS always carry a status area
/// - Linux needs a graphical session (Wayland or X11); headless boxes and
///   bare consoles report `false`
/// - anything else reports `false`
pub fn platform_tray_supported() -> bool {
    supported_inner()
}

#[cfg(any(target_os = "windows", target_os = "macos"))]
fn supported_inner() -> bool {
    true
}

#[cfg(target_os = "linux")]
fn supported_inner() -> bool {
    std::env::var_os("WAYLAND_DISPLAY").is_some() || std::env::var_os("DISPLAY").is_some()
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn supported_inner() -> bool {
    false
}
