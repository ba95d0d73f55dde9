use thiserror::Error;

/// Failure of a call to the remote bills store.
///
/// `Remote` displays the store's message verbatim ("Erreur 404") because the
/// bills page shows it to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to decode store response: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No user is logged in")]
    Missing,

    #[error("Malformed session record: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Malformed(err.to_string())
    }
}
