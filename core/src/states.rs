/// comprehensive summary of the view state, for tab bars and session trees
use serde::{Deserialize, Serialize};

use crate::{
    events::TextUnit,
    ids::{ServerId, SessionId},
    keys::SessionKind,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub id: SessionId,
    pub kind: SessionKind,
    pub name: String,
    /// lines past the last-read marker; drives tab highlighting
    pub unseen: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub id: ServerId,
    pub name: String,
    pub sessions: Vec<SessionInfo>,
}

#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewState {
    pub servers: Vec<ServerInfo>,
    pub active_session: Option<SessionId>,
}

impl ViewState {
    pub fn find_session(&self, id: SessionId) -> Option<&SessionInfo> {
        self.servers
            .iter()
            .flat_map(|s| s.sessions.iter())
            .find(|s| s.id == id)
    }
}

/// read-only copy of one buffer, as handed to the rendering collaborator
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    pub units: Vec<TextUnit>,
    pub marker_offset: usize,
}

impl BufferSnapshot {
    pub fn unseen(&self) -> usize {
        self.units.len() - self.marker_offset
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn view_state_round_trips_through_json() {
        let state = ViewState {
            servers: vec![ServerInfo {
                id: ServerId::new(),
                name: "libera".into(),
                sessions: vec![SessionInfo {
                    id: SessionId::new(),
                    kind: SessionKind::Channel,
                    name: "#rust".into(),
                    unseen: 3,
                }],
            }],
            active_session: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<ViewState>(&json).unwrap(), state);
    }

    #[test]
    fn find_session_walks_all_servers() {
        let id = SessionId::new();
        let mut state = ViewState::default();
        state.servers.push(ServerInfo {
            id: ServerId::new(),
            name: "a".into(),
            sessions: vec![],
        });
        state.servers.push(ServerInfo {
            id: ServerId::new(),
            name: "b".into(),
            sessions: vec![SessionInfo {
                id,
                kind: SessionKind::Query,
                name: "friend".into(),
                unseen: 0,
            }],
        });
        assert_eq!(state.find_session(id).unwrap().name, "friend");
    }
}
