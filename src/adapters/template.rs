//! Offline answer generator.
//!
//! Produces a deterministic, rule-based reply from the lab context embedded
//! in the request. Used by the binary when no hosted model is wired in, and
//! as a stand-in during local runs.

use crate::application::chat::CLOSING_ADVICE;
use crate::domain::RiskTier;
use crate::ports::{AnswerGenerator, AssistantError, AssistantRequest};

/// Answer generator that summarizes flagged results without a network call.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateAssistant;

impl TemplateAssistant {
    /// Context lines for results that are not `Normal`.
    fn flagged_lines(user_message: &str) -> Vec<&str> {
        let glyphs: Vec<&str> = RiskTier::ALL
            .iter()
            .filter(|t| **t != RiskTier::Normal)
            .map(RiskTier::glyph)
            .collect();

        user_message
            .lines()
            .map(str::trim)
            .filter(|line| glyphs.iter().any(|g| line.starts_with(*g)))
            .collect()
    }
}

impl AnswerGenerator for TemplateAssistant {
    fn generate(&self, request: &AssistantRequest) -> Result<String, AssistantError> {
        let question = request
            .user_message
            .rsplit_once("Question: ")
            .map_or("", |(_, q)| q.trim());

        let flagged = Self::flagged_lines(&request.user_message);

        let mut answer = String::new();
        if !question.is_empty() {
            answer.push_str(&format!("You asked: \"{question}\"\n\n"));
        }

        if flagged.is_empty() {
            answer.push_str("All of your listed results are within their reference ranges.\n");
        } else {
            answer.push_str("These results are outside or near the edge of their reference ranges:\n");
            for line in flagged {
                answer.push_str("- ");
                answer.push_str(line);
                answer.push('\n');
            }
        }

        answer.push('\n');
        answer.push_str(CLOSING_ADVICE);
        Ok(answer)
    }
}
