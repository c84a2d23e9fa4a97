//! UI layer for the desktop app: app shell, form panel, record list, and
//! toast notifications.

pub mod app;

pub use app::{FormApp, PersistedAppSettings, StartupConfig, SETTINGS_STORAGE_KEY};
