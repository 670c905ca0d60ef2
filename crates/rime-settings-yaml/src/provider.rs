//! YAML file configuration provider.

use crate::error::{YamlError, YamlResult};
use crate::node::{lookup, scalar_to_bool, scalar_to_string};
use crate::paths::SearchPaths;
use rime_settings::{ConfigProvider, ConfigSource};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Opens `<name>.yaml` from the Rime data directories.
#[derive(Debug, Clone, Default)]
pub struct YamlConfigProvider {
    paths: SearchPaths,
}

impl YamlConfigProvider {
    pub fn new(paths: SearchPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    /// First existing candidate file for `name`.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        self.paths
            .candidates(name)
            .into_iter()
            .find(|path| path.is_file())
    }
}

impl ConfigProvider for YamlConfigProvider {
    type Source = YamlConfig;
    type Error = YamlError;

    fn open(&self, name: &str) -> YamlResult<YamlConfig> {
        let path = self
            .find(name)
            .ok_or_else(|| YamlError::NotFound(name.to_string()))?;
        let config = YamlConfig::load(&path)?;
        info!(?path, "Opened config");
        Ok(config)
    }
}

/// A parsed YAML config file.
#[derive(Debug, Clone)]
pub struct YamlConfig {
    path: PathBuf,
    root: Value,
}

impl YamlConfig {
    /// Read and parse a YAML file.
    pub fn load(path: &Path) -> YamlResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| YamlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse YAML text; `path` is only used for error reporting.
    pub fn parse(content: &str, path: &Path) -> YamlResult<Self> {
        let root = if content.trim().is_empty() {
            Value::Null
        } else {
            serde_yaml::from_str(content).map_err(|source| YamlError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl ConfigSource for YamlConfig {
    fn get_bool(&self, key: &str) -> Option<bool> {
        lookup(&self.root, key).and_then(scalar_to_bool)
    }

    fn get_string(&self, key: &str) -> Option<String> {
        lookup(&self.root, key).and_then(scalar_to_string)
    }

    fn has_item(&self, key: &str) -> bool {
        lookup(&self.root, key).is_some()
    }

    fn close(self) {
        debug!(path = ?self.path, "Closed config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rime_settings::{
        CursorType, LookupTableOrientation, PreeditStyle, SettingsResolver,
    };
    use tempfile::TempDir;

    const IBUS_RIME_YAML: &str = r#"
style:
  inline_preedit: true
  preedit_style: preview
  cursor_type: select
  horizontal: false
  color_scheme: aqua
app_options:
  org.gnome.Terminal:
    style:
      inline_preedit: false
      horizontal: true
  firefox:
    style:
      color_scheme: no_such_scheme
      cursor_type: bogus
"#;

    struct Dirs {
        _tmp: TempDir,
        paths: SearchPaths,
    }

    fn dirs() -> Dirs {
        let tmp = TempDir::new().unwrap();
        let user = tmp.path().join("user");
        let shared = tmp.path().join("shared");
        fs::create_dir_all(user.join("build")).unwrap();
        fs::create_dir_all(shared.join("build")).unwrap();
        Dirs {
            paths: SearchPaths::new(user, shared),
            _tmp: tmp,
        }
    }

    #[test]
    fn test_open_missing_source() {
        let dirs = dirs();
        let provider = YamlConfigProvider::new(dirs.paths.clone());
        let err = provider.open("ibus_rime").unwrap_err();
        assert!(matches!(err, YamlError::NotFound(ref name) if name == "ibus_rime"));
    }

    #[test]
    fn test_open_invalid_yaml() {
        let dirs = dirs();
        fs::write(dirs.paths.user_dir.join("ibus_rime.yaml"), "style: [unclosed").unwrap();
        let provider = YamlConfigProvider::new(dirs.paths.clone());
        assert!(matches!(
            provider.open("ibus_rime").unwrap_err(),
            YamlError::Yaml { .. }
        ));
    }

    #[test]
    fn test_build_copy_wins_over_source() {
        let dirs = dirs();
        fs::write(dirs.paths.shared_dir.join("ibus_rime.yaml"), "style: {color_scheme: luna}")
            .unwrap();
        let provider = YamlConfigProvider::new(dirs.paths.clone());
        assert_eq!(
            provider.find("ibus_rime"),
            Some(dirs.paths.shared_dir.join("ibus_rime.yaml"))
        );

        fs::write(dirs.paths.user_dir.join("ibus_rime.yaml"), "style: {color_scheme: ink}")
            .unwrap();
        fs::write(
            dirs.paths.user_dir.join("build").join("ibus_rime.yaml"),
            "style: {color_scheme: azure}",
        )
        .unwrap();

        let config = provider.open("ibus_rime").unwrap();
        assert!(config.path().ends_with("build/ibus_rime.yaml"));
        assert_eq!(config.get_string("style/color_scheme").as_deref(), Some("azure"));
    }

    #[test]
    fn test_empty_file_has_no_items() {
        let config = YamlConfig::parse("", Path::new("empty.yaml")).unwrap();
        assert!(!config.has_item("style"));
        assert_eq!(config.get_bool("style/inline_preedit"), None);
    }

    #[test]
    fn test_resolve_from_files() {
        let dirs = dirs();
        fs::write(dirs.paths.user_dir.join("ibus_rime.yaml"), IBUS_RIME_YAML).unwrap();
        let resolver = SettingsResolver::new(YamlConfigProvider::new(dirs.paths.clone()));

        let global = resolver.resolve(None, false).unwrap();
        assert!(global.embed_preedit_text);
        assert_eq!(global.preedit_style, PreeditStyle::Preview);
        assert_eq!(global.cursor_type, CursorType::Select);
        assert_eq!(global.lookup_table_orientation, LookupTableOrientation::Vertical);
        assert_eq!(global.color_scheme_id(), Some("aqua"));

        let terminal = resolver.resolve(Some("org.gnome.Terminal"), false).unwrap();
        assert!(!terminal.embed_preedit_text);
        assert_eq!(terminal.lookup_table_orientation, LookupTableOrientation::Horizontal);
        assert_eq!(terminal.color_scheme_id(), Some("aqua"));

        let firefox = resolver.resolve(Some("firefox"), false).unwrap();
        assert_eq!(firefox.cursor_type, CursorType::Select);
        assert!(firefox.color_scheme.is_none());
    }

    #[test]
    fn test_reload_picks_up_redeployed_file() {
        let dirs = dirs();
        let file = dirs.paths.user_dir.join("ibus_rime.yaml");
        fs::write(&file, "style: {horizontal: true}").unwrap();
        let resolver = SettingsResolver::new(YamlConfigProvider::new(dirs.paths.clone()));

        let before = resolver.resolve(Some("gedit"), false).unwrap();
        assert_eq!(before.lookup_table_orientation, LookupTableOrientation::Horizontal);

        fs::write(&file, "style: {color_scheme: ink}").unwrap();
        assert_eq!(resolver.resolve(Some("gedit"), false).unwrap(), before);

        let after = resolver.resolve(Some("gedit"), true).unwrap();
        assert_eq!(after.lookup_table_orientation, LookupTableOrientation::SystemDefault);
        assert_eq!(after.color_scheme_id(), Some("ink"));

        fs::remove_file(&file).unwrap();
        assert!(resolver.resolve(Some("gedit"), true).is_err());
        assert!(resolver.cached_app_ids().is_empty());
    }
}
