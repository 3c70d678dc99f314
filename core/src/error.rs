use thiserror::Error;

use crate::{
    ids::{ServerId, SessionId},
    keys::SessionKind,
};

/// everything in this taxonomy is recoverable: the caller is told and the
/// view keeps running
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a {kind} session named '{name}' already exists on this server")]
    DuplicateSession { kind: SessionKind, name: String },

    #[error("unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("unknown server: {0}")]
    UnknownServer(ServerId),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
