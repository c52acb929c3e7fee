//! Page template options

/// Text and colours of the password prompt
///
/// Every field is shown to the visitor before decryption and is HTML-escaped
/// when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    /// `<title>` and heading of the prompt
    pub title: String,
    /// Paragraph under the heading
    pub instructions: String,
    pub button: String,
    pub placeholder: String,
    /// Shown on any failed attempt
    pub error: String,
    /// Label of the "remember me" checkbox
    pub remember: String,
    pub color_primary: String,
    pub color_secondary: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            title: "Protected Page".to_string(),
            instructions: String::new(),
            button: "DECRYPT".to_string(),
            placeholder: "Password".to_string(),
            error: "Bad password!".to_string(),
            remember: "Remember me".to_string(),
            color_primary: "#4CAF50".to_string(),
            color_secondary: "#76B852".to_string(),
        }
    }
}

impl TemplateOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }
}
