//! The message editor's text buffer.

use crate::protocol::ProtocolMessage;

/// Plain text buffer with append-at-end editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    /// Bumped on every edit
    revision: u64,
}

impl EditorBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count().max(1)
    }

    /// Edit counter for caching anything derived from the text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.touch();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.push(c);
        self.touch();
    }

    pub fn insert_str(&mut self, s: &str) {
        // Pasted text from terminals often carries CR line endings.
        self.text.push_str(&s.replace("\r\n", "\n").replace('\r', "\n"));
        self.touch();
    }

    pub fn newline(&mut self) {
        self.text.push('\n');
        self.touch();
    }

    pub fn backspace(&mut self) {
        if self.text.pop().is_some() {
            self.touch();
        }
    }

    /// Echo streamed messages into the buffer as a JSON array.
    ///
    /// An existing array gets the messages before its closing bracket, a
    /// single object is wrapped together with them, and anything else is
    /// replaced.
    pub fn append_messages<'a, I>(&mut self, messages: I)
    where
        I: IntoIterator<Item = &'a ProtocolMessage>,
    {
        let rendered: Vec<String> = messages
            .into_iter()
            .map(ProtocolMessage::to_pretty_json)
            .collect();
        if rendered.is_empty() {
            return;
        }
        let entries = rendered.join(",\n");

        let current = match self.text.trim() {
            "" => "[\n]",
            trimmed => trimmed,
        };

        self.text = if let Some(body) = current.strip_suffix(']') {
            let separator = if body.trim_end().ends_with('[') { "" } else { ",\n" };
            format!("{body}{separator}{entries}\n]")
        } else if current.starts_with('{') {
            format!("[\n{current},\n{entries}\n]")
        } else {
            format!("[\n{entries}\n]")
        };
        self.touch();
    }
}
