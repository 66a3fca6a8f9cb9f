/// Placeholder substituted with the user's message
pub const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Default instruction template: asks for a short, clear answer in Indonesian
pub const DEFAULT_PROMPT_TEMPLATE: &str = "[INST] Kamu adalah asisten AI yang sangat membantu. 
Berikan jawaban yang singkat, jelas, dan dalam Bahasa Indonesia untuk pertanyaan berikut:

{message}

Jawab dengan format yang mudah dibaca dan dipahami. [/INST]";

/// Instruction template wrapped around every inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the prompt for `message`
    ///
    /// Only the first placeholder is replaced so text inside the message that
    /// happens to look like a placeholder is left alone.
    pub fn render(&self, message: &str) -> String {
        self.template.replacen(MESSAGE_PLACEHOLDER, message, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TEMPLATE)
    }
}
