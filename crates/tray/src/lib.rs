//! System tray core for TrayKit.
//!
//! [`TrayManager`] is an explicitly constructed registry: it answers the
//! platform capability query, allocates [`TrayIcon`] records with
//! process-unique ids, routes their mutations to a pluggable [`Shell`], and
//! dispatches shell-reported input events (clicks, menu selections) to the
//! registered handler records synchronously.
//!
//! The [`Shell`] trait is the seam to the platform's native tray API. The
//! shell side delivers input through a channel ([`ShellEvent`]); the manager
//! drains it on the UI-affine thread via [`TrayManager::pump`]. The bundled
//! [`HeadlessShell`] implements the trait in-process for tests and demos.
//!
//! # Platform notes
//! - Linux: tray shells exist under StatusNotifierItem (Wayland) or the X11
//!   tray protocol; [`platform_tray_supported`] checks for a graphical
//!   session
//! - Windows / macOS: the shell is always present
//! - All manager and handler calls are single-context; nothing here is
//!   `Sync`

mod error;
mod event;
mod headless;
mod icon;
mod manager;
mod shell;
mod support;

pub use error::TrayError;
pub use event::{ClickEvent, ClickHandler, ClickKind, ShellEvent};
pub use headless::{HeadlessDriver, HeadlessShell};
pub use icon::{Bounds, IconState, TrayIcon, TrayIconId};
pub use manager::TrayManager;
pub use shell::Shell;
pub use support::platform_tray_supported;
