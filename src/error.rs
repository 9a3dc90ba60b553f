//! Error types for cookiecutter generation.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Problems found while reading or patching an SVG document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document has no `path` element.
    #[error("no path found in SVG document")]
    PathNotFound,

    /// The document has more than one `path` element.
    #[error("1 path expected, {0} found")]
    AmbiguousPath(usize),

    /// An element carries a `transform` attribute.
    #[error("transforms are not supported (found on <{0}>)")]
    UnsupportedTransform(String),

    /// The document does not have exactly one `sodipodi:namedview`.
    #[error("1 sodipodi:namedview expected, {0} found")]
    NamedViewCount(usize),

    /// The path has no `style` attribute.
    #[error("path has no style attribute")]
    MissingStyle,

    /// A style statement has no `:` separator.
    #[error("invalid style statement {0:?}: missing ':'")]
    InvalidStyle(String),

    /// The document is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// An attribute value holds a broken escape sequence.
    #[error("invalid escape in attribute value: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// The patched document could not be serialized.
    #[error("failed to serialize SVG: {0}")]
    Serialize(String),
}

/// Errors that abort a cookiecutter run.
#[derive(Debug, Error)]
pub enum Error {
    /// The source SVG does not exist.
    #[error("{} does not exist", .0.display())]
    InputNotFound(PathBuf),

    /// No perimeter widths are known for this printer setup.
    #[error("unsupported configuration: {0}")]
    Configuration(String),

    /// The SVG document cannot be used.
    #[error("{}: {source}", .path.display())]
    MalformedDocument {
        /// File the document was read from.
        path: PathBuf,
        /// What is wrong with it.
        #[source]
        source: DocumentError,
    },

    /// An external tool exited with a non-zero status.
    #[error("{tool} failed with {status}")]
    ExternalToolFailure {
        /// Name of the tool.
        tool: &'static str,
        /// Exit status reported by the process.
        status: ExitStatus,
    },

    /// A required input of an external tool is missing.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// An external tool could not be found.
    #[error("{0} not found in $PATH")]
    ToolNotFound(String),

    /// IO error on a specific file.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CAD configuration could not be encoded.
    #[error("failed to encode CAD configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The run was interrupted by the user.
    #[error("interrupted")]
    Interrupted,
}

impl Error {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the source file to a document error.
    pub fn malformed(path: impl Into<PathBuf>, source: DocumentError) -> Self {
        Error::MalformedDocument {
            path: path.into(),
            source,
        }
    }
}

/// Result type for cookiecutter operations.
pub type Result<T> = std::result::Result<T, Error>;
