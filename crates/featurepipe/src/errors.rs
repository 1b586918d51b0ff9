//! # Error Types

/// Errors from featurepipe operations.
#[derive(Debug, thiserror::Error)]
pub enum FeaturePipeError {
    /// Symbol absent from a growth-frozen alphabet.
    ///
    /// Recoverable: callers decide whether a miss is out-of-vocabulary
    /// noise (inference) or a bug (training).
    #[error("symbol not found: {symbol}")]
    NotFound {
        /// Debug rendering of the missing symbol.
        symbol: String,
    },

    /// Index past the end of the table; indicates a caller bug.
    #[error("index {index} out of range for size {size}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The current table size.
        size: usize,
    },

    /// A shape whose joint assignment count overflows `usize`.
    #[error("shape {shape:?} is too large: assignment count overflows usize")]
    ShapeTooLarge {
        /// The offending ordered outcome counts.
        shape: Vec<usize>,
    },

    /// A stage received a record representation it does not accept.
    #[error("stage '{stage}' expected {expected}, got {actual}")]
    TypeMismatch {
        /// The stage kind.
        stage: &'static str,
        /// The representation the stage accepts.
        expected: &'static str,
        /// The representation it received.
        actual: &'static str,
    },

    /// A stage was used outside a pipeline, with no bound alphabets.
    #[error("stage '{stage}' used outside a pipeline (alphabets not bound)")]
    UnboundStage {
        /// The stage kind.
        stage: &'static str,
    },

    /// Persisted state is newer than this reader understands.
    ///
    /// Fatal at load time; nothing is partially loaded.
    #[error("{component} format version {found} exceeds supported version {supported}")]
    IncompatibleVersion {
        /// The persisted component name.
        component: String,
        /// The stored format version.
        found: u32,
        /// The newest version this reader supports.
        supported: u32,
    },

    /// Persisted pipeline names a stage kind with no registered factory.
    #[error("unknown stage kind: {kind}")]
    UnknownStage {
        /// The unrecognized stage kind.
        kind: String,
    },

    /// An external collaborator is unreachable.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// A stage failed while processing one record.
    #[error("stage '{stage}' failed on record '{record}': {cause}")]
    StageFailed {
        /// The stage kind.
        stage: String,
        /// The record's name and source, for diagnostics.
        record: String,
        /// The underlying stage error.
        #[source]
        cause: Box<FeaturePipeError>,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (persisted state, integers, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for featurepipe operations.
pub type FPResult<T> = core::result::Result<T, FeaturePipeError>;
