//! UI layer for the registration window: app shell and panels.

pub mod app;
pub mod panels;

pub use app::{BadgeDesktopApp, APP_TITLE};
