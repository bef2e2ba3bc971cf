use crate::tree::Position;

/// Failure while substituting variables
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A reference could not be resolved by the default lookup
    #[error(
        "Undefined variable ${name}{}",
        .position.map(|position| format!(" at {position}")).unwrap_or_default()
    )]
    UndefinedVariable {
        name: String,
        position: Option<Position>,
    },
}

/// Failure while reading a document or options file
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse yaml/json")]
    ParseFailed(#[from] serde_yaml::Error),
}
