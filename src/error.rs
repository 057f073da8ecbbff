use thiserror::Error as ThisError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The reason a submitted proof failed to verify.
///
/// Kept as a structured discriminator rather than a string so callers can
/// match on the specific failure mode instead of parsing an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidProofKind {
    /// The claimed base (leaf) digest does not match what the proof implies.
    BaseMismatch,
    /// The recomputed state does not match the expected target state.
    StateMismatch,
    /// Folding `subset` of the path did not reconstruct the prior state.
    PriorStateMismatch,
    /// Folding the entire path did not reconstruct the later state.
    LaterStateMismatch,
    /// The proof's `path`/`rule`/`subset` fields are inconsistent.
    MalformedProof,
}

impl std::fmt::Display for InvalidProofKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            InvalidProofKind::BaseMismatch => "base hash does not match",
            InvalidProofKind::StateMismatch => "state does not match",
            InvalidProofKind::PriorStateMismatch => "prior state does not match",
            InvalidProofKind::LaterStateMismatch => "later state does not match",
            InvalidProofKind::MalformedProof => "proof is malformed",
        };
        write!(f, "{}", msg)
    }
}

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("unsupported algorithm or parameter: {0}")]
    UnsupportedParameter(String),

    #[error("invalid challenge: {0}")]
    InvalidChallenge(String),

    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    #[error("invalid proof: {kind}")]
    InvalidProof { kind: InvalidProofKind },

    #[error("backend error: {0}")]
    BackendError(String),
}

impl Error {
    #[inline]
    pub fn invalid_proof(kind: InvalidProofKind) -> Self {
        Error::InvalidProof { kind }
    }
}

impl From<hex::FromHexError> for Error {
    #[inline]
    fn from(error: hex::FromHexError) -> Self {
        Error::UnsupportedParameter(format!("hex error: {}", error))
    }
}

impl From<redb::Error> for Error {
    #[inline]
    fn from(value: redb::Error) -> Self {
        Error::BackendError(value.to_string())
    }
}

impl From<redb::DatabaseError> for Error {
    #[inline]
    fn from(value: redb::DatabaseError) -> Self {
        Error::BackendError(value.to_string())
    }
}

impl From<redb::TransactionError> for Error {
    #[inline]
    fn from(value: redb::TransactionError) -> Self {
        Error::BackendError(value.to_string())
    }
}

impl From<redb::TableError> for Error {
    #[inline]
    fn from(value: redb::TableError) -> Self {
        Error::BackendError(value.to_string())
    }
}

impl From<redb::StorageError> for Error {
    #[inline]
    fn from(value: redb::StorageError) -> Self {
        Error::BackendError(value.to_string())
    }
}

impl From<redb::CommitError> for Error {
    #[inline]
    fn from(value: redb::CommitError) -> Self {
        Error::BackendError(value.to_string())
    }
}
