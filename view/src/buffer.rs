use ircmux_core::{events::TextUnit, states::BufferSnapshot};

/// Append-only record of one session's display content plus the last-read
/// marker. Appends are always legal, active session or not; the marker only
/// ever moves forward, and only when the owning session is switched to.
#[derive(Debug, Default)]
pub struct SessionBuffer {
    content: Vec<TextUnit>,
    marker_offset: usize,
}

impl SessionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, unit: TextUnit) {
        self.content.push(unit);
    }

    pub fn advance_marker_to_end(&mut self) {
        self.marker_offset = self.content.len();
    }

    pub fn content(&self) -> &[TextUnit] {
        &self.content
    }

    pub fn marker_offset(&self) -> usize {
        self.marker_offset
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// lines past the last-read marker
    pub fn unseen(&self) -> usize {
        self.content.len() - self.marker_offset
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            units: self.content.clone(),
            marker_offset: self.marker_offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn appends_preserve_call_order() {
        let mut buffer = SessionBuffer::new();
        buffer.append(TextUnit::new("one"));
        buffer.append(TextUnit::new("two"));
        buffer.append(TextUnit::new("three"));

        let texts: Vec<_> = buffer.content().iter().map(|u| u.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn marker_starts_at_zero_and_advances_to_end() {
        let mut buffer = SessionBuffer::new();
        buffer.append(TextUnit::new("a"));
        buffer.append(TextUnit::new("b"));
        assert_eq!(buffer.marker_offset(), 0);
        assert_eq!(buffer.unseen(), 2);

        buffer.advance_marker_to_end();
        assert_eq!(buffer.marker_offset(), 2);
        assert_eq!(buffer.unseen(), 0);
    }

    #[test]
    fn later_appends_never_move_the_marker() {
        let mut buffer = SessionBuffer::new();
        buffer.append(TextUnit::new("a"));
        buffer.advance_marker_to_end();

        buffer.append(TextUnit::new("b"));
        buffer.append(TextUnit::new("c"));
        assert_eq!(buffer.marker_offset(), 1);
        assert_eq!(buffer.unseen(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutation() {
        let mut buffer = SessionBuffer::new();
        buffer.append(TextUnit::new("a"));
        let snapshot = buffer.snapshot();

        buffer.append(TextUnit::new("b"));
        assert_eq!(snapshot.units.len(), 1);
        assert_eq!(snapshot.marker_offset, 0);
        assert_eq!(buffer.len(), 2);
    }
}
