/// Short chat labels and the full questions they stand for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReplies {
    entries: Vec<(String, String)>,
}

impl Default for QuickReplies {
    fn default() -> Self {
        Self::from_pairs([
            ("Skills?", "What are your skills?"),
            ("Projects?", "Tell me about your projects"),
            ("Contact?", "How can I contact you?"),
            ("Hire?", "Are you available for hire?"),
        ])
    }
}

impl QuickReplies {
    pub fn from_pairs<I, L, Q>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, Q)>,
        L: Into<String>,
        Q: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(label, question)| (label.into(), question.into()))
                .collect(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Full question for `label`; unmapped labels are returned verbatim.
    pub fn expand(&self, label: &str) -> String {
        let key = label.trim();
        self.entries
            .iter()
            .find(|(known, _)| known == key)
            .map(|(_, question)| question.clone())
            .unwrap_or_else(|| label.to_string())
    }
}
