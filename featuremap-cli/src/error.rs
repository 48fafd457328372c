//! Error types emitted by the featuremap CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::{path::PathBuf, sync::Arc};

use featuremap_core::{DescribeTableError, FragmentError};
use thiserror::Error;

/// Errors emitted by the featuremap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing flag.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: PathBuf,
    },
    /// The container could not be opened.
    #[error("failed to open container {path:?}: {source}")]
    OpenContainer {
        /// Container path.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The feature document could not be read.
    #[error("failed to read feature document {path:?}: {source}")]
    ReadFeature {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The feature document was not a valid feature.
    #[error("failed to parse feature document {path:?}: {source}")]
    ParseFeature {
        /// Document path.
        path: PathBuf,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Reading the table schema failed.
    #[error(transparent)]
    DescribeTable(#[from] DescribeTableError),
    /// The statement could not be built for the feature.
    #[error(transparent)]
    Statement(#[from] FragmentError),
    /// Writing the statement to stdout failed.
    #[error("failed to write statement: {0}")]
    WriteOutput(#[source] std::io::Error),
}
