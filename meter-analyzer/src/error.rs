use std::result;

use thiserror::Error;

use crate::scope::ScopeType;

/// A specialized `Result` type for loading entity configuration.
pub type EntityConfigResult<T> = result::Result<T, EntityConfigError>;

/// Errors returned while loading or validating entity configuration.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EntityConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read entity configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration document is not valid YAML or does not match the
    /// expected shape.
    #[error("Failed to parse entity configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A mandatory single label key is missing or empty.
    #[error("{scope} entity requires a non-empty `{field}`")]
    MissingKey {
        /// Scope of the rejected entity.
        scope: ScopeType,
        /// Name of the offending field.
        field: &'static str,
    },
    /// A key list the scope's identity depends on is empty.
    #[error("{scope} entity requires at least one key in `{field}`")]
    EmptyKeyList {
        /// Scope of the rejected entity.
        scope: ScopeType,
        /// Name of the offending field.
        field: &'static str,
    },
    /// A key list contains an empty key name.
    #[error("{scope} entity has an empty key name at `{field}[{index}]`")]
    EmptyKeyName {
        /// Scope of the rejected entity.
        scope: ScopeType,
        /// Name of the offending field.
        field: &'static str,
        /// Position of the empty name within the list.
        index: usize,
    },
    /// Two rules share the same name.
    #[error("Duplicate entity rule name: {0}")]
    DuplicateRule(String),
}
