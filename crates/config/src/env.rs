use std::collections::BTreeMap;
use std::ffi::OsString;

/// Source of environment variables.
///
/// Rendering never touches `std::env` directly so a build can be driven from an explicit set of
/// variables.
pub trait Environment {
    fn var_os(&self, key: &str) -> Option<OsString>;
}

/// The environment of the running process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// A fixed set of variables.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, OsString>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<OsString>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<OsString>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { vars }
    }
}

impl Environment for MapEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.vars.get(key).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}
