//! Error types for pattern authoring, resolution and output

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all composition operations
#[derive(Debug, Error)]
pub enum ComposeError {
    /// A choice option supplied a different number of patterns than anchors
    ///
    /// Raised at authoring time by `Pattern::add_choice`
    #[error(
        "Choice option {option} supplies {patterns} pattern(s) for {anchors} anchor(s)"
    )]
    ArityMismatch {
        /// Index of the offending option within the choice point
        option: usize,
        /// Number of anchors registered for the choice point
        anchors: usize,
        /// Number of patterns the option supplied
        patterns: usize,
    },

    /// A selection names an option that the choice point does not have
    #[error("Option {option} is out of range for choice point {choice} ({available} option(s))")]
    SelectionOutOfRange {
        /// Index of the choice point within its pattern
        choice: usize,
        /// Requested option index
        option: usize,
        /// Number of options the choice point offers
        available: usize,
    },

    /// A pattern transitively references itself
    #[error("Cyclic pattern reference: {}", cycle.join(" -> "))]
    CyclicPatternReference {
        /// Pattern names along the cycle, first name repeated at the end
        cycle: Vec<String>,
    },

    /// A pattern name has no definition in the library
    #[error("Unknown pattern '{name}'")]
    UnknownPattern {
        /// The name that failed to resolve
        name: String,
    },

    /// A pattern name was registered twice
    #[error("Pattern '{name}' is already defined")]
    DuplicatePattern {
        /// The name defined more than once
        name: String,
    },

    /// The number of variants does not fit in a `u64`
    #[error("Variant count of pattern overflows at choice point {choice}")]
    VariantCountOverflow {
        /// Index of the choice point where the product overflowed
        choice: usize,
    },

    /// A parameter failed validation
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A pattern document could not be parsed
    #[error("Failed to parse pattern document '{}': {source}", path.display())]
    DocumentParse {
        /// Path of the document
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A result could not be encoded as JSON
    #[error("Failed to encode output: {source}")]
    Encode {
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to save a preview image to disk
    #[error("Failed to export image to '{}': {source}", path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        #[source]
        source: image::ImageError,
    },

    /// The resolved tree has nothing to draw
    #[error("Nothing to preview: resolved tree contains no drawable parts")]
    EmptyPreview,
}

/// Convenience type alias for composition results
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ComposeError {
    ComposeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Wrap an I/O error with the path and operation that produced it
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> ComposeError {
    ComposeError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
