//! Namespaced material keys.
//!
//! A material names what an icon looks like (e.g. `minecraft:diamond`). Keys are
//! validated on parse so menu layouts fail early on typos such as `Diamond`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Namespace used when a key omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Error returned when parsing an invalid [`Material`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterialError {
    /// Input was empty or whitespace.
    #[error("material key cannot be empty")]
    Empty,
    /// Namespace part was empty, too long, or had invalid characters.
    #[error("invalid material namespace `{0}` (allowed: a-z0-9_.-, max 64)")]
    Namespace(String),
    /// Path part was empty, too long, or had invalid characters.
    #[error("invalid material path `{0}` (allowed: a-z0-9_./-, max 128)")]
    Path(String),
}

/// A material key of the form `namespace:path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Material {
    namespace: String,
    path: String,
}

impl Material {
    /// Parse a material key, defaulting the namespace to [`DEFAULT_NAMESPACE`].
    pub fn parse(input: &str) -> Result<Self, MaterialError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(MaterialError::Empty);
        }

        let (namespace, path) = match input.split_once(':') {
            Some((ns, p)) => (ns.trim(), p.trim()),
            None => (DEFAULT_NAMESPACE, input),
        };

        validate_namespace(namespace)?;
        validate_path(path)?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// The empty-slot material.
    pub fn air() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: "air".to_string(),
        }
    }

    /// Whether this is the empty-slot material.
    pub fn is_air(&self) -> bool {
        self.namespace == DEFAULT_NAMESPACE && self.path == "air"
    }

    /// Key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Material {
    type Err = MaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Material {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Material::parse(&raw).map_err(serde::de::Error::custom)
    }
}

fn validate_namespace(ns: &str) -> Result<(), MaterialError> {
    let valid = !ns.is_empty()
        && ns.len() <= 64
        && ns
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(MaterialError::Namespace(ns.to_string()))
    }
}

fn validate_path(path: &str) -> Result<(), MaterialError> {
    let valid = !path.is_empty()
        && path.len() <= 128
        && path
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'));
    if valid {
        Ok(())
    } else {
        Err(MaterialError::Path(path.to_string()))
    }
}
