use ircmux_core::events::{NickEntry, TextUnit};

/// The shared widget surface, implemented by the UI collaborator over the
/// real window (text view, nick list, input and topic fields). The core only
/// swaps which session's state the surface shows; it never inspects the
/// widgets themselves.
pub trait RenderTarget {
    /// point the text display and nick list at this session's state
    fn bind(&mut self, content: &[TextUnit], marker_offset: usize, roster: &[NickEntry]);

    /// nothing to show; called when the view goes unbound
    fn clear(&mut self);

    /// live text of the input field at detach time
    fn capture_input_text(&self) -> String;

    /// live text of the topic field at detach time
    fn capture_topic_text(&self) -> String;

    fn restore_input_text(&mut self, text: &str);

    fn restore_topic_text(&mut self, text: &str);
}

/// recording stand-in for the real widgets
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FakeTarget {
    pub shown: Vec<String>,
    pub shown_marker: usize,
    pub shown_roster: Vec<String>,
    pub input: String,
    pub topic: String,
    pub cleared: bool,
}

#[cfg(test)]
impl RenderTarget for FakeTarget {
    fn bind(&mut self, content: &[TextUnit], marker_offset: usize, roster: &[NickEntry]) {
        self.cleared = false;
        self.shown = content.iter().map(|u| u.text.clone()).collect();
        self.shown_marker = marker_offset;
        self.shown_roster = roster.iter().map(|e| format!("{}{}", e.rank, e.name)).collect();
    }

    fn clear(&mut self) {
        self.cleared = true;
        self.shown.clear();
        self.shown_marker = 0;
        self.shown_roster.clear();
        self.input.clear();
        self.topic.clear();
    }

    fn capture_input_text(&self) -> String {
        self.input.clone()
    }

    fn capture_topic_text(&self) -> String {
        self.topic.clone()
    }

    fn restore_input_text(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn restore_topic_text(&mut self, text: &str) {
        self.topic = text.to_string();
    }
}
