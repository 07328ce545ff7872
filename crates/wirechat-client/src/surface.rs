//! Input and display surfaces a chat session reads from and renders into.
//!
//! Elements are addressed by stable string keys. `Document` is the in-memory
//! surface: containers hold rendered `<p>` markup with the text escaped, so
//! server text is always inserted as data.

use std::collections::HashMap;

use wirechat_common::ChatError;

/// Where a session reads user input and appends rendered replies.
pub trait Surface {
    /// Current value of the text field `key`.
    fn input_value(&self, key: &str) -> Result<String, ChatError>;

    /// Append one line of plain text to the container `key`.
    fn append_text(&mut self, key: &str, text: &str) -> Result<(), ChatError>;
}

/// One element of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    TextInput { value: String },
    Container { lines: Vec<String> },
}

/// In-memory element tree keyed by element key.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document with one empty text field and one empty container.
    pub fn with_chat_layout(input_key: &str, display_key: &str) -> Self {
        let mut doc = Self::new();
        doc.insert_input(input_key);
        doc.insert_container(display_key);
        doc
    }

    pub fn insert_input(&mut self, key: &str) {
        self.elements.insert(
            key.to_string(),
            Element::TextInput {
                value: String::new(),
            },
        );
    }

    pub fn insert_container(&mut self, key: &str) {
        self.elements
            .insert(key.to_string(), Element::Container { lines: Vec::new() });
    }

    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.elements.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.elements.get(key)
    }

    /// Set the value of a text field, as typing into it would.
    pub fn set_input_value(&mut self, key: &str, value: &str) -> Result<(), ChatError> {
        match self.elements.get_mut(key) {
            Some(Element::TextInput { value: current }) => {
                *current = value.to_string();
                Ok(())
            }
            _ => Err(ChatError::InputMissing(key.to_string())),
        }
    }

    /// Rendered lines of a container, oldest first.
    pub fn lines(&self, key: &str) -> Option<&[String]> {
        match self.elements.get(key) {
            Some(Element::Container { lines }) => Some(lines),
            _ => None,
        }
    }

    /// Concatenated markup of a container.
    pub fn inner_html(&self, key: &str) -> Option<String> {
        self.lines(key).map(|lines| lines.concat())
    }
}

impl Surface for Document {
    fn input_value(&self, key: &str) -> Result<String, ChatError> {
        match self.elements.get(key) {
            Some(Element::TextInput { value }) => Ok(value.clone()),
            _ => Err(ChatError::InputMissing(key.to_string())),
        }
    }

    fn append_text(&mut self, key: &str, text: &str) -> Result<(), ChatError> {
        match self.elements.get_mut(key) {
            Some(Element::Container { lines }) => {
                lines.push(format!("<p>{}</p>", escape_html(text)));
                Ok(())
            }
            _ => Err(ChatError::RenderTargetMissing(key.to_string())),
        }
    }
}

/// Escape text for insertion into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_value_reads_text_field() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        assert_eq!(doc.input_value("userInput").unwrap(), "");
        doc.set_input_value("userInput", "hi").unwrap();
        assert_eq!(doc.input_value("userInput").unwrap(), "hi");
    }

    #[test]
    fn input_value_missing_field() {
        let doc = Document::new();
        assert_eq!(
            doc.input_value("userInput"),
            Err(ChatError::InputMissing("userInput".into()))
        );
    }

    #[test]
    fn container_is_not_an_input() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        assert!(doc.input_value("chat").is_err());
        assert!(doc.set_input_value("chat", "x").is_err());
    }

    #[test]
    fn append_wraps_line_in_paragraph() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        doc.append_text("chat", "Bot: hello").unwrap();
        doc.append_text("chat", "Bot: again").unwrap();
        assert_eq!(
            doc.inner_html("chat").unwrap(),
            "<p>Bot: hello</p><p>Bot: again</p>"
        );
    }

    #[test]
    fn append_to_missing_container_fails() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        doc.remove("chat");
        assert_eq!(
            doc.append_text("chat", "Bot: hello"),
            Err(ChatError::RenderTargetMissing("chat".into()))
        );
    }

    #[test]
    fn append_to_input_fails() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        assert!(matches!(
            doc.append_text("userInput", "x"),
            Err(ChatError::RenderTargetMissing(_))
        ));
    }

    #[test]
    fn appended_text_is_escaped() {
        let mut doc = Document::with_chat_layout("userInput", "chat");
        doc.append_text("chat", "<img src=x onerror=\"alert('x')\"> & co")
            .unwrap();
        assert_eq!(
            doc.lines("chat").unwrap(),
            ["<p>&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt; &amp; co</p>"]
        );
    }
}
