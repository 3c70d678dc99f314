use ircmux_core::{
    ids::{ServerId, SessionId},
    keys::{SessionKey, SessionKind},
    states::SessionInfo,
};

use crate::{buffer::SessionBuffer, roster::NickRoster};

/// One open conversation: a channel, a private query, or the server status
/// tab. Owns its buffer and roster outright; the drafts hold whatever was in
/// the input and topic widgets the last time this session was switched away
/// from.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    server_id: ServerId,
    key: SessionKey,
    name: String,
    pub buffer: SessionBuffer,
    pub roster: NickRoster,
    pub draft_input: String,
    pub draft_topic: String,
}

impl Session {
    pub fn new(server_id: ServerId, kind: SessionKind, name: &str) -> Self {
        Self {
            id: SessionId::new(),
            server_id,
            key: SessionKey::new(kind, name),
            name: name.to_string(),
            buffer: SessionBuffer::new(),
            roster: NickRoster::new(),
            draft_input: String::new(),
            draft_topic: String::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn server_id(&self) -> ServerId {
        self.server_id
    }

    pub fn kind(&self) -> SessionKind {
        self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            kind: self.key.kind,
            name: self.name.clone(),
            unseen: self.buffer.unseen(),
        }
    }
}
