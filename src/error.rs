//! Error types for strproc
//!
//! Collection never fails: deciding whether a member is tagged is the only
//! check made when a processor type is built. Everything here is raised either
//! while a pipeline runs or while processor types are assembled from names.

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors produced by processors and registries
#[derive(Error, Debug)]
pub enum FilterError {
    /// A filter failed while being applied. The pipeline stopped at this filter.
    #[error("filter '{filter}' (member #{index}) of processor '{processor}' failed: {source}")]
    Invocation {
        /// Processor type the filter belongs to
        processor: String,
        /// Name of the failing filter
        filter: String,
        /// Declaration index of the filter among all members
        index: usize,
        /// Underlying failure
        #[source]
        source: anyhow::Error,
    },

    /// Input could not be treated as a string
    #[error("input is not a valid UTF-8 string: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),

    /// A filter name was not found in the registry
    #[error("unknown filter '{name}' requested by processor '{processor}'")]
    UnknownFilter { processor: String, name: String },

    /// A method name was not declared on the processor type
    #[error("processor '{processor}' has no member named '{name}'")]
    UnknownMethod { processor: String, name: String },

    /// A processor type name was not found
    #[error("unknown processor '{0}'")]
    UnknownProcessor(String),
}

impl FilterError {
    /// Name of the failing filter, if this is an invocation error
    pub fn filter_name(&self) -> Option<&str> {
        match self {
            FilterError::Invocation { filter, .. } => Some(filter),
            _ => None,
        }
    }
}
