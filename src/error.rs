use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be mapped onto the document model. `path` names the
    /// offending field, e.g. `paths./pets.get.parameters[0].in`.
    #[error("failed to decode document at `{path}`: {message}")]
    Decode { path: String, message: String },

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Field path of a decode failure, `None` for other kinds.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Decode { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// A string that is not one of the tags of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}
