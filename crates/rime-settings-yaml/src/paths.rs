use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Rime user data directory used by ibus-rime.
pub fn default_user_data_dir() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ibus")
        .join("rime")
}

/// System-wide Rime data directory.
pub fn default_shared_data_dir() -> PathBuf {
    PathBuf::from("/usr/share/rime-data")
}

/// Directories searched for `<name>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPaths {
    pub user_dir: PathBuf,
    pub shared_dir: PathBuf,
}

impl Default for SearchPaths {
    fn default() -> Self {
        Self {
            user_dir: default_user_data_dir(),
            shared_dir: default_shared_data_dir(),
        }
    }
}

impl SearchPaths {
    pub fn new(user_dir: impl Into<PathBuf>, shared_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_dir: user_dir.into(),
            shared_dir: shared_dir.into(),
        }
    }

    /// Candidate files in lookup order: deployed copies before sources, user
    /// data before shared data.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let file_name = format!("{}.yaml", name);
        let dirs: [&Path; 2] = [self.user_dir.as_path(), self.shared_dir.as_path()];
        dirs.iter()
            .flat_map(|dir| [dir.join("build").join(&file_name), dir.join(&file_name)])
            .collect()
    }
}
