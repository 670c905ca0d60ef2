//! Backend configuration store boundary.
//!
//! The resolver only needs to open a named source, read booleans and strings
//! at flat `/`-delimited keys, probe whether a key exists, and close the
//! source again. Concrete stores (YAML files, in-memory maps) live behind
//! these traits.

/// Opens named configuration sources.
pub trait ConfigProvider: Send + Sync {
    type Source: ConfigSource;
    type Error: std::error::Error + Send + Sync + 'static;

    fn open(&self, name: &str) -> Result<Self::Source, Self::Error>;
}

/// An open configuration source.
pub trait ConfigSource {
    fn get_bool(&self, key: &str) -> Option<bool>;

    fn get_string(&self, key: &str) -> Option<String>;

    /// Whether anything is stored at `key` (a value or a nested section).
    fn has_item(&self, key: &str) -> bool;

    /// Release the source. Dropping has the same effect.
    fn close(self)
    where
        Self: Sized,
    {
    }
}

impl<P: ConfigProvider + ?Sized> ConfigProvider for &P {
    type Source = P::Source;
    type Error = P::Error;

    fn open(&self, name: &str) -> Result<Self::Source, Self::Error> {
        (**self).open(name)
    }
}
