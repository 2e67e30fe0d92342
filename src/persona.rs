/// Who the assistant is supposed to be.
pub const BASE_PERSONA: &str = "\
You are OnWear's friendly and knowledgeable Customer Assistant AI.
You help customers find shoes, t-shirts and caps, answer product questions, give recommendations, and assist with returns or store policies.
If the customer asks about a specific brand or price, refer to the provided product list.
Be polite, concise, and professional. Use emojis occasionally to sound friendly.";

/// Appended to every request so replies fit the list/paragraph renderer.
pub const FORMATTING_RULES: &str = "\
If appropriate, reply using bullet points when giving product options, comparisons, or recommendations.
Start every bullet point on its own line with '-'.
You may use short paragraphs for explanations or greetings.
Do not use Markdown or HTML; use plain text only.";

/// Instructions text sent with each request. Grows once when the catalog arrives.
#[derive(Debug, Clone)]
pub struct Persona {
    text: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self::new(BASE_PERSONA)
    }
}

impl Persona {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn append_catalog(&mut self, summary: &str) {
        self.text.push_str("\n\nComplete product catalog (for reference):\n");
        self.text.push_str(summary);
    }

    /// Persona followed by the formatting rules.
    pub fn instructions(&self) -> String {
        format!("{}\n\n{}", self.text, FORMATTING_RULES)
    }
}
