//! Settings resolution and the per-app cache.

use crate::color;
use crate::error::{SettingsError, SettingsResult};
use crate::path::ConfigPath;
use crate::source::{ConfigProvider, ConfigSource};
use crate::{CursorType, LookupTableOrientation, PreeditStyle, ResolverConfig, Settings};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

const APP_OPTIONS: &str = "app_options";

const INLINE_PREEDIT: &str = "style/inline_preedit";
const PREEDIT_STYLE: &str = "style/preedit_style";
const CURSOR_TYPE: &str = "style/cursor_type";
const HORIZONTAL: &str = "style/horizontal";
const COLOR_SCHEME: &str = "style/color_scheme";

/// Cached result for one app id. `""` holds the global settings.
#[derive(Debug, Clone)]
struct AppSettingsCacheEntry {
    app_id: String,
    settings: Settings,
}

/// Resolves [`Settings`] for app ids and caches the results.
///
/// The cache lock is held for the whole of [`resolve`](Self::resolve), so
/// concurrent callers never observe a half-cleared or half-written cache.
pub struct SettingsResolver<P: ConfigProvider> {
    provider: P,
    config: ResolverConfig,
    cache: Mutex<HashMap<String, AppSettingsCacheEntry>>,
}

impl<P: ConfigProvider> SettingsResolver<P> {
    /// Create a resolver reading the default `ibus_rime` source.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ResolverConfig::default())
    }

    pub fn with_config(provider: P, config: ResolverConfig) -> Self {
        Self {
            provider,
            config,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<String, AppSettingsCacheEntry>> {
        // Entries are only ever inserted whole, so a poisoned map is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve the settings for `app_id`.
    ///
    /// A missing or empty id means the global settings. With `force_reload`
    /// the whole cache is dropped first, for every app, and stays dropped even
    /// if the source then fails to open. On open failure nothing else changes.
    pub fn resolve(&self, app_id: Option<&str>, force_reload: bool) -> SettingsResult<Settings> {
        let app_id = normalize_app_id(app_id);
        let mut cache = self.lock_cache();

        if force_reload {
            info!(app_id, cached = cache.len(), "Forced reload, clearing settings cache");
            cache.clear();
        } else if let Some(entry) = cache.get(app_id) {
            debug!(app_id, "Settings cache hit");
            return Ok(entry.settings);
        }

        let name = self.config.source_name.as_str();
        let source = self
            .provider
            .open(name)
            .map_err(|e| SettingsError::BackendOpen {
                name: name.to_string(),
                source: Box::new(e),
            })?;
        debug!(app_id, source = name, "Settings cache miss, reading config");

        let settings = resolve_from_source(&source, app_id);
        source.close();

        cache.insert(
            app_id.to_string(),
            AppSettingsCacheEntry {
                app_id: app_id.to_string(),
                settings,
            },
        );
        Ok(settings)
    }

    /// Cached settings for `app_id`, without touching the backend.
    pub fn peek(&self, app_id: Option<&str>) -> Option<Settings> {
        let app_id = normalize_app_id(app_id);
        self.lock_cache().get(app_id).map(|entry| entry.settings)
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        let mut cache = self.lock_cache();
        info!(cached = cache.len(), "Invalidating settings cache");
        cache.clear();
    }

    /// App ids currently cached, sorted.
    pub fn cached_app_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .lock_cache()
            .values()
            .map(|entry| entry.app_id.clone())
            .collect();
        ids.sort();
        ids
    }
}

fn normalize_app_id(app_id: Option<&str>) -> &str {
    app_id.unwrap_or("")
}

/// Merge defaults, the global style section and, for a non-empty `app_id`
/// with an `app_options/<app_id>` section, the app's style section.
pub fn resolve_from_source<S: ConfigSource>(source: &S, app_id: &str) -> Settings {
    let mut settings = Settings::DEFAULT;
    apply_style(&mut settings, source, &ConfigPath::root());

    if !app_id.is_empty() {
        let app_path = ConfigPath::parse(APP_OPTIONS).child(app_id);
        if source.has_item(&app_path.to_key()) {
            debug!(app_id, "Applying app-specific style overrides");
            apply_style(&mut settings, source, &app_path);
        }
    }

    settings
}

/// Overlay the `style/*` keys found under `base`. Absent keys and
/// unrecognized enum values leave the field as it was; an unknown color
/// scheme id clears the scheme.
fn apply_style<S: ConfigSource>(settings: &mut Settings, source: &S, base: &ConfigPath) {
    let key = |suffix: &str| base.join(&ConfigPath::parse(suffix)).to_key();

    if let Some(inline) = source.get_bool(&key(INLINE_PREEDIT)) {
        settings.embed_preedit_text = inline;
    }

    let preedit_key = key(PREEDIT_STYLE);
    if let Some(value) = source.get_string(&preedit_key) {
        match PreeditStyle::from_config(&value) {
            Some(style) => settings.preedit_style = style,
            None => debug!(key = %preedit_key, %value, "Ignoring unrecognized preedit style"),
        }
    }

    let cursor_key = key(CURSOR_TYPE);
    if let Some(value) = source.get_string(&cursor_key) {
        match CursorType::from_config(&value) {
            Some(cursor) => settings.cursor_type = cursor,
            None => debug!(key = %cursor_key, %value, "Ignoring unrecognized cursor type"),
        }
    }

    if let Some(horizontal) = source.get_bool(&key(HORIZONTAL)) {
        settings.lookup_table_orientation = LookupTableOrientation::from_horizontal(horizontal);
    }

    if let Some(id) = source.get_string(&key(COLOR_SCHEME)) {
        settings.color_scheme = color::lookup(&id);
        match settings.color_scheme {
            Some(_) => debug!(color_scheme = %id, "Selected color scheme"),
            None => debug!(color_scheme = %id, "Unknown color scheme, using UI default colors"),
        }
    }
}
