//! Addressing for the backend configuration store.
//!
//! The store takes flat `a/b/c` strings. [`ConfigPath`] keeps the segments
//! separately so that joining a base with a suffix never produces a leading
//! or doubled separator.

use std::fmt;

/// An ordered sequence of path segments. The root path has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// The empty base path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a `/`-delimited key into segments. `""` parses to the root.
    pub fn parse(key: &str) -> Self {
        if key.is_empty() {
            return Self::root();
        }
        Self {
            segments: key.split('/').map(str::to_string).collect(),
        }
    }

    /// Append a single segment verbatim.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Append all segments of `other`.
    pub fn join(&self, other: &ConfigPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// The flat key the backend understands.
    pub fn to_key(&self) -> String {
        self.segments.join("/")
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

impl From<&str> for ConfigPath {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}
