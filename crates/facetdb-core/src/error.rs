use thiserror::Error as ThisError;

///
/// Error
///
/// Top-level error surface for provider and executor calls.
///
/// Parser and native-filter failures never reach this type: the filter
/// language is user-typed and degrades to empty/no-op results instead.
/// Configuration and engine errors propagate verbatim.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Mutation(#[from] MutationError),
}

///
/// ConfigError
///
/// Fatal misuse of the engine surface: a programming or deployment defect,
/// not user input.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("table identifier '{table}' is not a valid SQL identifier")]
    InvalidTableIdent { table: String },

    #[error("provider has no table configured")]
    MissingTable,

    #[error("schema has not been loaded; call load() before querying")]
    SchemaNotLoaded,

    #[error("column '{column}' is not present in the loaded schema")]
    UnknownColumn { column: String },

    #[error("provider does not accept this load input; expected {expected}")]
    UnsupportedLoadInput { expected: &'static str },
}

///
/// EngineError
///
/// Failure reported by an external SQL engine round-trip.
///

#[derive(Debug, ThisError)]
#[error("engine error: {message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    /// Wrap an engine-reported failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

///
/// MutationError
///
/// Caller-recoverable row-mutation failures.
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum MutationError {
    #[error("row {row_id} does not exist")]
    RowNotFound { row_id: u64 },

    #[error("the {backend} backend does not support row mutation")]
    Unsupported { backend: &'static str },
}
