//! The "current settings" slot read by the UI layer.
//!
//! [`SettingsResolver::resolve`] returns a value; this module publishes it.
//! The process-wide slot starts out holding [`Settings::DEFAULT`] and is only
//! ever overwritten by a successful resolution.

use crate::error::SettingsResult;
use crate::resolver::SettingsResolver;
use crate::source::ConfigProvider;
use crate::Settings;
use std::sync::{PoisonError, RwLock};
use tracing::error;

/// A last-writer-wins holder for the most recently resolved settings.
#[derive(Debug)]
pub struct CurrentSettings {
    inner: RwLock<Settings>,
}

static CURRENT_SETTINGS: CurrentSettings = CurrentSettings::new();

impl CurrentSettings {
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(Settings::DEFAULT),
        }
    }

    /// The process-wide slot.
    pub fn global() -> &'static CurrentSettings {
        &CURRENT_SETTINGS
    }

    /// Copy of the published settings.
    pub fn get(&self) -> Settings {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn publish(&self, settings: Settings) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    /// Resolve and publish. On failure the error is logged, the slot keeps
    /// its previous value and the error is handed back.
    pub fn load<P: ConfigProvider>(
        &self,
        resolver: &SettingsResolver<P>,
        app_id: Option<&str>,
        force_reload: bool,
    ) -> SettingsResult<Settings> {
        match resolver.resolve(app_id, force_reload) {
            Ok(settings) => {
                self.publish(settings);
                Ok(settings)
            }
            Err(e) => {
                error!(
                    app_id = app_id.unwrap_or(""),
                    error = %e,
                    "Error loading settings, keeping previous settings"
                );
                Err(e)
            }
        }
    }
}

impl Default for CurrentSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy of the process-wide current settings.
pub fn current_settings() -> Settings {
    CURRENT_SETTINGS.get()
}

/// Resolve settings for `app_id` into the process-wide slot.
///
/// Best effort: a failure is logged and leaves the slot as it was.
pub fn load_settings<P: ConfigProvider>(
    resolver: &SettingsResolver<P>,
    app_id: Option<&str>,
    force_reload: bool,
) {
    let _ = CURRENT_SETTINGS.load(resolver, app_id, force_reload);
}

/// Reload after the config has been redeployed: drops every cached app and
/// resolves `app_id` afresh into the process-wide slot.
pub fn deploy<P: ConfigProvider>(resolver: &SettingsResolver<P>, app_id: Option<&str>) {
    load_settings(resolver, app_id, true);
}
