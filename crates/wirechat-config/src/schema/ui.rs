//! Element keys and rendering options for the chat surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Key of the text field a send reads from.
    pub input_key: String,
    /// Key of the container replies are appended to.
    pub display_key: String,
    /// Prefix put in front of every rendered reply.
    pub reply_prefix: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            input_key: "userInput".into(),
            display_key: "chat".into(),
            reply_prefix: "Bot: ".into(),
        }
    }
}
