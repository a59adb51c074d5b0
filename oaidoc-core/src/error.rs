//! Error types for document generation.
//!
//! Every variant is a configuration error: it is raised while routes are
//! being registered at startup, never while requests are being served.

use thiserror::Error;

use crate::params::Location;

/// Result alias used throughout the generation engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by a generation call.
///
/// A failing call aborts as a whole; the generator never hands out a
/// partially built schema or parameter list.
#[derive(Error, Debug)]
pub enum Error {
    /// The type has no schema classification (channels, function pointers, ...).
    #[error("type `{type_name}` cannot be described by a schema: {reason}")]
    UnsupportedType {
        type_name: String,
        reason: &'static str,
    },

    /// A composite type without a qualified name was used where a component
    /// name is needed and no explicit name was supplied.
    #[error("anonymous type of kind {kind} needs an explicit schema name")]
    AnonymousType { kind: &'static str },

    /// Map keys must serialize as strings.
    #[error("map `{type_name}` has non-string key type `{key}`")]
    NonStringMapKey { type_name: String, key: String },

    /// The media type token is neither a known alias nor a known media type.
    #[error("unsupported media type `{0}`")]
    UnsupportedMediaType(String),

    /// Two fields bind to the same wire name in the same location.
    #[error("duplicate {location} parameter `{name}`")]
    DuplicateParameter { name: String, location: Location },

    /// A parameter field has a type that cannot be sent as a single wire value.
    #[error("field `{field}` of type `{type_name}` cannot be used as a {location} parameter")]
    UnsupportedParameterType {
        field: String,
        type_name: String,
        location: Location,
    },

    /// A flattened field is not a struct or a map, or flattens into itself.
    #[error("field `{field}` cannot be flattened: {reason}")]
    InvalidEmbedding { field: String, reason: &'static str },

    /// The `{name}` segments of a path template and the path parameters differ.
    #[error("path `{path}` does not match its path parameters (missing: {missing:?}, unexpected: {unexpected:?})")]
    PathParameterMismatch {
        path: String,
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// The same method and path were registered twice.
    #[error("operation {method} {path} is already registered")]
    DuplicateOperation { method: String, path: String },

    /// The HTTP method has no slot in an OpenAPI path item.
    #[error("unsupported HTTP method `{0}`")]
    UnsupportedMethod(String),

    /// The response status is not a valid HTTP status code.
    #[error("invalid response status {0}")]
    InvalidStatus(u16),

    /// Configuration could not be read.
    #[error("configuration error: {0}")]
    Config(String),

    /// The document could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
