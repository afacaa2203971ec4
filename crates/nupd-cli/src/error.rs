use miette::Diagnostic;
use nupd_manifest::ManifestError;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Error while {action}: {source}")]
    #[diagnostic(code(nupd::io))]
    IoError {
        action: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(nupd::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Component not found: {0}")]
    #[diagnostic(
        code(nupd::component_not_found),
        help("Run `nupd inspect` to list the components in this manifest")
    )]
    ComponentNotFound(String),

    #[error("{0} field(s) could not be decoded")]
    #[diagnostic(
        code(nupd::dropped_fields),
        help("Dropped fields keep their zero value in the decoded manifest")
    )]
    DroppedFields(usize),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Trait for adding context to IO errors.
pub trait ErrorContext<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String;
}

impl<T> ErrorContext<T> for std::io::Result<T> {
    fn with_context<C>(self, context: C) -> CliResult<T>
    where
        C: FnOnce() -> String,
    {
        self.map_err(|err| {
            CliError::IoError {
                action: context(),
                source: err,
            }
        })
    }
}
