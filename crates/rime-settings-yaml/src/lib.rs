//! rime-settings-yaml: YAML file backend for `rime-settings`.
//!
//! Rime keeps its configuration as YAML under a user data directory and a
//! shared data directory; deployment writes compiled copies into `build/`.
//! [`YamlConfigProvider`] opens `<name>.yaml` from those locations and serves
//! flat `a/b/c` key lookups over the parsed document.

mod error;
mod node;
mod paths;
mod provider;

pub use error::{YamlError, YamlResult};
pub use node::{lookup, scalar_to_bool, scalar_to_string};
pub use paths::{default_shared_data_dir, default_user_data_dir, SearchPaths};
pub use provider::{YamlConfig, YamlConfigProvider};
