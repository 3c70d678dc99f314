use ircmux_core::ids::SessionId;

/// Which session currently occupies the shared view. At most one, ever.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewBinding {
    #[default]
    Unbound,
    Bound(SessionId),
}

impl ViewBinding {
    pub fn bound_session(&self) -> Option<SessionId> {
        match self {
            ViewBinding::Unbound => None,
            ViewBinding::Bound(id) => Some(*id),
        }
    }

    pub fn is_bound_to(&self, id: SessionId) -> bool {
        matches!(self, ViewBinding::Bound(bound) if *bound == id)
    }
}
