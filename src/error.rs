//! Rich diagnostic error types for the rough-medu engine.
//!
//! Every failure is local and synchronous: the analysis operations are pure
//! computations over validated in-memory state, so errors only describe bad
//! input (empty categories, unknown relation names, malformed blocks) and
//! configuration I/O.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the rough-medu engine.
#[derive(Debug, Error, Diagnostic)]
pub enum RoughError {
    #[error("invalid argument: {message}")]
    #[diagnostic(
        code(rough::invalid_argument),
        help(
            "Categories and relation groups must contain at least one element, \
             and the universe can only be replaced before any relation is defined."
        )
    )]
    InvalidArgument { message: String },

    #[error("relation \"{name}\" is not defined in this knowledge base")]
    #[diagnostic(
        code(rough::unknown_relation),
        help(
            "Register the relation with `add_parent_relation` first. Results computed \
             over different relation sets are not comparable."
        )
    )]
    UnknownRelation { name: String },

    #[error("unrecognized rough comparison mode: \"{mode}\"")]
    #[diagnostic(
        code(rough::invalid_mode),
        help("Valid modes are \"bottom\", \"top\" and \"both\" (or an empty string).")
    )]
    InvalidMode { mode: String },

    #[error("malformed relation \"{name}\": {message}")]
    #[diagnostic(
        code(rough::malformed_relation),
        help(
            "Blocks must be non-empty, pairwise disjoint and reference only elements \
             of the universe set with `set_granules`."
        )
    )]
    MalformedRelation { name: String, message: String },

    #[error("reduct search over {size} relations exceeds the configured limit of {limit}")]
    #[diagnostic(
        code(rough::search_limit),
        help(
            "Reduct and core search enumerates the power set of the group. \
             Shrink the relation group or raise `reduct_search_limit` in AnalysisConfig."
        )
    )]
    SearchLimitExceeded { size: usize, limit: usize },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read analysis config: {path}")]
    #[diagnostic(
        code(rough::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse analysis config: {path}: {message}")]
    #[diagnostic(
        code(rough::config::parse),
        help("Check the TOML syntax and field names in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write analysis config: {path}")]
    #[diagnostic(
        code(rough::config::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning rough-medu results.
pub type RoughResult<T> = std::result::Result<T, RoughError>;

impl RoughError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        RoughError::InvalidArgument {
            message: message.into(),
        }
    }

    pub(crate) fn malformed(name: &str, message: impl Into<String>) -> Self {
        RoughError::MalformedRelation {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
