use ircmux_core::{
    error::{SessionError, SessionResult},
    events::{Rank, TextUnit},
    ids::{ServerId, SessionId},
    keys::SessionKind,
    states::{BufferSnapshot, ViewState},
};

use crate::{
    binding::ViewBinding, prelude::*, render::RenderTarget, server::Server, session::Session,
};

/// The multiplexer: every server and session the client has open, plus the
/// one shared render target they take turns occupying. All mutation goes
/// through here, on one task, so sessions never race each other for the
/// widgets.
pub struct Mux<T: RenderTarget> {
    servers: Vec<Server>,
    binding: ViewBinding,
    target: T,
}

fn find_session(servers: &[Server], id: SessionId) -> Option<&Session> {
    servers.iter().find_map(|s| s.session(id))
}

fn find_session_mut(servers: &mut [Server], id: SessionId) -> Option<&mut Session> {
    servers.iter_mut().find_map(|s| s.session_mut(id))
}

impl<T: RenderTarget> Mux<T> {
    pub fn new(target: T) -> Self {
        Self {
            servers: Vec::new(),
            binding: ViewBinding::Unbound,
            target,
        }
    }

    pub fn binding(&self) -> ViewBinding {
        self.binding
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    // ---- lifecycle ----

    pub fn create_server(&mut self, name: &str) -> ServerId {
        let server = Server::new(name);
        let id = server.id();
        debug!(%id, name, "creating server");
        self.servers.push(server);
        id
    }

    /// cascades through the same unbind path as destroy_session, so a bound
    /// child never leaves a dangling binding behind
    pub fn destroy_server(&mut self, id: ServerId) -> SessionResult<()> {
        let i = self
            .servers
            .iter()
            .position(|s| s.id() == id)
            .ok_or(SessionError::UnknownServer(id))?;
        if let Some(active) = self.binding.bound_session() {
            if self.servers[i].session(active).is_some() {
                self.unbind();
            }
        }
        debug!(%id, "destroying server");
        self.servers.remove(i);
        Ok(())
    }

    pub fn create_session(
        &mut self,
        server_id: ServerId,
        kind: SessionKind,
        name: &str,
    ) -> SessionResult<SessionId> {
        let server = self
            .servers
            .iter_mut()
            .find(|s| s.id() == server_id)
            .ok_or(SessionError::UnknownServer(server_id))?;
        let id = server.create_session(kind, name)?;
        debug!(%id, %kind, name, "created session");
        Ok(id)
    }

    pub fn destroy_session(&mut self, id: SessionId) -> SessionResult<()> {
        if find_session(&self.servers, id).is_none() {
            return Err(SessionError::UnknownSession(id));
        }
        // the binding must drop to Unbound before the session goes away
        if self.binding.is_bound_to(id) {
            self.unbind();
        }
        debug!(%id, "destroying session");
        for server in &mut self.servers {
            if server.session(id).is_some() {
                return server.destroy_session(id);
            }
        }
        Err(SessionError::UnknownSession(id))
    }

    // ---- ingestion, always permitted whether or not the target is active ----

    pub fn append_to_session(&mut self, id: SessionId, unit: TextUnit) -> SessionResult<()> {
        let session =
            find_session_mut(&mut self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        trace!(%id, "append");
        session.buffer.append(unit);
        if self.binding.is_bound_to(id) {
            self.rebind_active(id);
        }
        Ok(())
    }

    pub fn update_roster(&mut self, id: SessionId, nick: &str, rank: Rank) -> SessionResult<()> {
        let session =
            find_session_mut(&mut self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        session.roster.add_or_update(nick, rank);
        if self.binding.is_bound_to(id) {
            self.rebind_active(id);
        }
        Ok(())
    }

    pub fn remove_from_roster(&mut self, id: SessionId, nick: &str) -> SessionResult<()> {
        let session =
            find_session_mut(&mut self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        session.roster.remove(nick);
        if self.binding.is_bound_to(id) {
            self.rebind_active(id);
        }
        Ok(())
    }

    pub fn rename_in_roster(&mut self, id: SessionId, old: &str, new: &str) -> SessionResult<()> {
        let session =
            find_session_mut(&mut self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        session.roster.rename(old, new);
        if self.binding.is_bound_to(id) {
            self.rebind_active(id);
        }
        Ok(())
    }

    /// topic changes land in the draft; the bound session also gets its
    /// topic widget refreshed right away
    pub fn set_topic(&mut self, id: SessionId, topic: &str) -> SessionResult<()> {
        let session =
            find_session_mut(&mut self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        session.draft_topic = topic.to_string();
        if self.binding.is_bound_to(id) {
            self.target.restore_topic_text(topic);
        }
        Ok(())
    }

    pub fn log_raw(&mut self, server_id: ServerId, line: String) -> SessionResult<()> {
        let server = self
            .servers
            .iter_mut()
            .find(|s| s.id() == server_id)
            .ok_or(SessionError::UnknownServer(server_id))?;
        server.log_raw(line);
        Ok(())
    }

    // ---- the switch protocol ----

    /// Detach the bound session (saving its live drafts), point the shared
    /// widgets at `id`, restore its drafts, and mark it read. An unknown id
    /// leaves the binding untouched.
    pub fn switch_to(&mut self, id: SessionId) -> SessionResult<()> {
        if find_session(&self.servers, id).is_none() {
            return Err(SessionError::UnknownSession(id));
        }
        if let Some(current) = self.binding.bound_session() {
            if current == id {
                // already showing; the live widget text is newer than the
                // saved drafts, so only mark it read and refresh
                if let Some(session) = find_session_mut(&mut self.servers, id) {
                    session.buffer.advance_marker_to_end();
                }
                self.rebind_active(id);
                return Ok(());
            }
            self.save_drafts(current);
        }
        debug!(%id, "switching view");
        if let Some(session) = find_session_mut(&mut self.servers, id) {
            let roster = session.roster.list();
            // bind with the old marker so the view shows where reading
            // stopped, then mark everything read
            self.target
                .bind(session.buffer.content(), session.buffer.marker_offset(), &roster);
            self.target.restore_input_text(&session.draft_input);
            self.target.restore_topic_text(&session.draft_topic);
            session.buffer.advance_marker_to_end();
        }
        self.binding = ViewBinding::Bound(id);
        Ok(())
    }

    /// save the bound session's drafts and leave nothing on the view
    pub fn unbind(&mut self) {
        if let Some(current) = self.binding.bound_session() {
            debug!(session = %current, "unbinding view");
            self.save_drafts(current);
            self.target.clear();
            self.binding = ViewBinding::Unbound;
        }
    }

    // ---- queries ----

    pub fn snapshot(&self, id: SessionId) -> SessionResult<BufferSnapshot> {
        let session = find_session(&self.servers, id).ok_or(SessionError::UnknownSession(id))?;
        Ok(session.buffer.snapshot())
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            servers: self.servers.iter().map(Server::info).collect(),
            active_session: self.binding.bound_session(),
        }
    }

    // ---- internals ----

    /// detach step: the live widget text wins over whatever draft was stored
    fn save_drafts(&mut self, id: SessionId) {
        let input = self.target.capture_input_text();
        let topic = self.target.capture_topic_text();
        if let Some(session) = find_session_mut(&mut self.servers, id) {
            session.draft_input = input;
            session.draft_topic = topic;
        }
    }

    /// refresh the widgets for the bound session after its state changed
    fn rebind_active(&mut self, id: SessionId) {
        if let Some(session) = find_session(&self.servers, id) {
            let roster = session.roster.list();
            self.target
                .bind(session.buffer.content(), session.buffer.marker_offset(), &roster);
        }
    }
}
