use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// the server status tab itself
    #[display("server")]
    Server,
    #[display("channel")]
    Channel,
    #[display("query")]
    Query,
}

/// RFC 1459 casemapping: channel and nick names compare with `[]\~` folded
/// to `{}|^` in addition to ASCII lowercasing
pub fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'A'..='Z' => c.to_ascii_lowercase(),
            '[' => '{',
            ']' => '}',
            '\\' => '|',
            '~' => '^',
            _ => c,
        })
        .collect()
}

/// how a session is keyed within its server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub kind: SessionKind,
    normalized: String,
}

impl SessionKey {
    pub fn new(kind: SessionKind, name: &str) -> Self {
        Self {
            kind,
            normalized: normalize(name),
        }
    }
}
