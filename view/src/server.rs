use ircmux_core::{
    error::{SessionError, SessionResult},
    ids::{ServerId, SessionId},
    keys::{SessionKey, SessionKind},
    states::ServerInfo,
};

use crate::session::Session;

/// One network connection. Owns its sessions; the Vec order is the display
/// order of the tabs under this server.
#[derive(Debug)]
pub struct Server {
    id: ServerId,
    name: String,
    sessions: Vec<Session>,
    /// raw protocol traffic, kept for the rawlog window
    raw_log: Vec<String>,
}

impl Server {
    pub fn new(name: &str) -> Self {
        Self {
            id: ServerId::new(),
            name: name.to_string(),
            sessions: Vec::new(),
            raw_log: Vec::new(),
        }
    }

    pub fn id(&self) -> ServerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// sessions are keyed by kind plus case-normalized name within a server
    pub fn create_session(&mut self, kind: SessionKind, name: &str) -> SessionResult<SessionId> {
        let key = SessionKey::new(kind, name);
        if self.sessions.iter().any(|s| s.key() == &key) {
            return Err(SessionError::DuplicateSession {
                kind,
                name: name.to_string(),
            });
        }
        let session = Session::new(self.id, kind, name);
        let id = session.id();
        self.sessions.push(session);
        Ok(id)
    }

    pub fn destroy_session(&mut self, id: SessionId) -> SessionResult<()> {
        let i = self
            .sessions
            .iter()
            .position(|s| s.id() == id)
            .ok_or(SessionError::UnknownSession(id))?;
        self.sessions.remove(i);
        Ok(())
    }

    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    pub fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id() == id)
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn log_raw(&mut self, line: String) {
        self.raw_log.push(line);
    }

    pub fn raw_log(&self) -> &[String] {
        &self.raw_log
    }

    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            id: self.id,
            name: self.name.clone(),
            sessions: self.sessions.iter().map(Session::info).collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sessions_keep_insertion_order() {
        let mut server = Server::new("libera");
        server.create_session(SessionKind::Server, "libera").unwrap();
        server.create_session(SessionKind::Channel, "#rust").unwrap();
        server.create_session(SessionKind::Query, "friend").unwrap();

        let names: Vec<_> = server.sessions().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["libera", "#rust", "friend"]);
    }

    #[test]
    fn duplicate_names_are_detected_case_insensitively() {
        let mut server = Server::new("libera");
        server.create_session(SessionKind::Channel, "#Foo").unwrap();

        let err = server.create_session(SessionKind::Channel, "#foo").unwrap_err();
        assert!(matches!(err, SessionError::DuplicateSession { .. }));

        // same name under a different kind is a different session
        server.create_session(SessionKind::Query, "#foo").unwrap();
    }

    #[test]
    fn raw_log_appends_in_order() {
        let mut server = Server::new("libera");
        server.log_raw(":irc PING".to_string());
        server.log_raw(":irc PONG".to_string());
        assert_eq!(server.raw_log(), [":irc PING", ":irc PONG"]);
    }

    #[test]
    fn destroy_unknown_session_errors() {
        let mut server = Server::new("libera");
        let stray = SessionId::new();
        assert_eq!(
            server.destroy_session(stray),
            Err(SessionError::UnknownSession(stray))
        );
    }
}
