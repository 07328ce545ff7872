//! Terminal surface: stdin stands in for the text field, stdout for the
//! reply container.

use std::io::Write;

use wirechat_client::Surface;
use wirechat_common::ChatError;

/// Text field and container backed by a line-oriented terminal.
pub struct TerminalSurface<W: Write> {
    input_key: String,
    display_key: String,
    input: String,
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(input_key: &str, display_key: &str, out: W) -> Self {
        Self {
            input_key: input_key.to_string(),
            display_key: display_key.to_string(),
            input: String::new(),
            out,
        }
    }

    /// Replace the text field contents with the line just typed.
    pub fn set_input(&mut self, line: String) {
        self.input = line;
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn input_value(&self, key: &str) -> Result<String, ChatError> {
        if key == self.input_key {
            Ok(self.input.clone())
        } else {
            Err(ChatError::InputMissing(key.to_string()))
        }
    }

    // Plain text on a terminal, so nothing to escape.
    fn append_text(&mut self, key: &str, text: &str) -> Result<(), ChatError> {
        if key != self.display_key {
            return Err(ChatError::RenderTargetMissing(key.to_string()));
        }
        writeln!(self.out, "{text}")
            .and_then(|()| self.out.flush())
            .map_err(|e| ChatError::SurfaceWrite(format!("{key}: {e}")))
    }
}
