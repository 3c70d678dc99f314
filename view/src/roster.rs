use std::collections::HashMap;

use ircmux_core::{
    events::{NickEntry, Rank},
    keys,
};
use itertools::Itertools;

/// Participant list of one session. Entries are keyed by RFC 1459 normalized
/// nick; the display casing of the most recent update is kept.
#[derive(Debug, Default)]
pub struct NickRoster {
    entries: HashMap<String, NickEntry>,
}

impl NickRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_or_update(&mut self, nick: &str, rank: Rank) {
        self.entries.insert(
            keys::normalize(nick),
            NickEntry {
                name: nick.to_string(),
                rank,
            },
        );
    }

    /// no-op when the nick is absent
    pub fn remove(&mut self, nick: &str) {
        self.entries.remove(&keys::normalize(nick));
    }

    /// nick change; keeps the rank, no-op when `old` is absent
    pub fn rename(&mut self, old: &str, new: &str) {
        if let Some(entry) = self.entries.remove(&keys::normalize(old)) {
            self.entries.insert(
                keys::normalize(new),
                NickEntry {
                    name: new.to_string(),
                    rank: entry.rank,
                },
            );
        }
    }

    pub fn rank_of(&self, nick: &str) -> Option<Rank> {
        self.entries.get(&keys::normalize(nick)).map(|e| e.rank)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// display order: highest rank first, then normalized nick
    pub fn list(&self) -> Vec<NickEntry> {
        self.entries
            .iter()
            .sorted_by(|(ka, a), (kb, b)| b.rank.cmp(&a.rank).then_with(|| ka.cmp(kb)))
            .map(|(_, entry)| entry.clone())
            .collect()
    }
}
