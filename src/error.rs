use std::path::PathBuf;

use thiserror::Error;

use crate::date_format::DateParseError;

/// Errors surfaced while loading a properties file or resolving a date property.
///
/// String, integer, boolean and path accessors never produce one of these; they
/// fall back to a default instead.
#[derive(Debug, Error)]
pub enum PropsError {
    /// The file could not be read. The underlying error is passed through untouched.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Not a single line of the input had a `key = value` shape. `path` is empty
    /// when the text did not come from a file.
    #[error("no properties file lines contained property mappings")]
    NoMappings { path: PathBuf },

    #[error("error reading date property from properties file - no such key {key}")]
    NoSuchKey { key: String },

    /// The value has no `format:` directive.
    #[error("attempted to match improperly formed date property for key: {key}")]
    MalformedDate { key: String },

    #[error("failed to match date format {format} for key {key}")]
    UnrecognizedFormat { key: String, format: String },

    #[error("failed to parse date property for key {key}: {source}")]
    DateParse {
        key: String,
        #[source]
        source: DateParseError,
    },
}

pub type Result<T, E = PropsError> = std::result::Result<T, E>;
