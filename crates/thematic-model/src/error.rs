use thiserror::Error;

/// Structural problems found while parsing a resource identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("resource name is empty")]
    Empty,
    #[error("resource name [{raw}] has more than one namespace delimiter")]
    TooManyNamespaces { raw: String },
    #[error("resource name [{raw}] has an empty namespace")]
    EmptyNamespace { raw: String },
    #[error("resource name [{raw}] contains an empty segment")]
    EmptySegment { raw: String },
}

impl NameError {
    /// The offending raw identifier, when one was supplied.
    pub fn raw(&self) -> Option<&str> {
        match self {
            NameError::Empty => None,
            NameError::TooManyNamespaces { raw }
            | NameError::EmptyNamespace { raw }
            | NameError::EmptySegment { raw } => Some(raw),
        }
    }
}

pub type Result<T> = std::result::Result<T, NameError>;
