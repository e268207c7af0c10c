//! Chat service: Answers questions about lab results through the assistant.
//!
//! This service coordinates:
//! - Session token validation (advisory)
//! - Query sanitization
//! - Context rendering
//! - The assistant call
//! - Audit logging of the outcome
//!
//! Every failure ends in a user-facing fallback message; nothing propagates
//! out of `process_query`.

use std::sync::Arc;

use crate::adapters::sanitize::{contains_pii, sanitize};
use crate::application::audit::{validate_session_token, AuditLogger};
use crate::application::context::build_context;
use crate::application::insights::{summarize, QuickInsights};
use crate::domain::ResultRecord;
use crate::ports::{AnswerGenerator, AssistantError, AssistantRequest, AuditEvent};
use crate::LabsightError;

/// Sentence every assistant answer should end with.
pub const CLOSING_ADVICE: &str =
    "Please consult your healthcare provider for medical advice and treatment recommendations.";

/// Instructions sent as the system turn of every request.
pub const SYSTEM_PROMPT: &str = "\
You are a medical report assistant chatbot designed to help patients understand their lab results.

IMPORTANT GUIDELINES:
1. Always include medical disclaimers
2. Never provide specific medical advice or diagnoses
3. Encourage consultation with healthcare providers
4. Focus on explaining test results in plain language
5. Be empathetic and supportive
6. If unsure about anything, recommend consulting a doctor

Your role is to:
- Explain what lab tests measure
- Help interpret results in context of reference ranges
- Provide general health information
- Answer questions about lab terminology

Always end responses with: \"Please consult your healthcare provider for medical advice and treatment recommendations.\"
";

pub const EMPTY_QUERY_REPLY: &str = "Please ask a specific question about your lab results.";
pub const AUTH_FAILURE_REPLY: &str = "Authentication error. Please check your API key.";
pub const RATE_LIMIT_REPLY: &str =
    "Service temporarily unavailable due to high demand. Please try again later.";
pub const GENERIC_FAILURE_REPLY: &str = "I apologize, but I'm experiencing technical difficulties. \
Please try again later or consult your healthcare provider directly.";

const SUGGESTED_QUESTIONS: [&str; 8] = [
    "What do my cholesterol levels mean?",
    "Are any of my results concerning?",
    "What lifestyle changes should I consider?",
    "Which tests are outside the normal range?",
    "What does my blood sugar level indicate?",
    "How are my kidney function tests?",
    "What do my blood count results show?",
    "Should I be worried about any results?",
];

/// Standard medical disclaimer shown above results.
#[must_use]
pub fn medical_disclaimer() -> &'static str {
    "⚠️ Medical Disclaimer: This tool is for educational purposes only and does not provide \
medical advice, diagnosis, or treatment recommendations. Always consult with qualified \
healthcare professionals for medical concerns and before making any medical decisions."
}

/// Privacy notice shown before any results are loaded.
#[must_use]
pub fn privacy_notice() -> &'static str {
    "🔒 Privacy Notice: This application is designed with HIPAA compliance in mind. \
Your data is not permanently stored and all interactions are processed securely."
}

/// Assistant request parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

impl AssistantConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - LABSIGHT_ASSISTANT_MODEL
    /// - LABSIGHT_ASSISTANT_MAX_TOKENS
    /// - LABSIGHT_ASSISTANT_TEMPERATURE (0.0 to 2.0)
    #[must_use]
    pub fn from_env_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = lookup("LABSIGHT_ASSISTANT_MODEL") {
            let v = v.trim();
            if !v.is_empty() {
                cfg.model = v.to_string();
            }
        }

        if let Some(v) = lookup("LABSIGHT_ASSISTANT_MAX_TOKENS") {
            if let Ok(x) = v.trim().parse::<u32>() {
                if x > 0 {
                    cfg.max_tokens = x;
                }
            }
        }

        if let Some(v) = lookup("LABSIGHT_ASSISTANT_TEMPERATURE") {
            if let Ok(x) = v.trim().parse::<f32>() {
                if x.is_finite() && (0.0..=2.0).contains(&x) {
                    cfg.temperature = x;
                }
            }
        }

        cfg
    }
}

/// Service for answering lab-result questions.
pub struct ChatService<G>
where
    G: AnswerGenerator,
{
    generator: Arc<G>,
    audit: AuditLogger,
    config: AssistantConfig,
}

impl<G> ChatService<G>
where
    G: AnswerGenerator,
{
    /// Create a chat service with configuration taken from the environment.
    pub fn new(generator: Arc<G>, audit: AuditLogger) -> Self {
        Self::with_config(generator, audit, AssistantConfig::from_env_or_default())
    }

    pub fn with_config(generator: Arc<G>, audit: AuditLogger, config: AssistantConfig) -> Self {
        tracing::info!("Chat service initialized (model={})", config.model);
        Self {
            generator,
            audit,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Answer a user question about the given results.
    ///
    /// Always returns text for the user: the assistant's answer, or a
    /// fallback message when the question is blank or the assistant fails.
    pub fn process_query(
        &self,
        user_query: &str,
        records: &[ResultRecord],
        session_token: &str,
    ) -> String {
        if user_query.trim().is_empty() {
            return EMPTY_QUERY_REPLY.to_string();
        }

        if !validate_session_token(session_token) {
            tracing::warn!("Invalid session ID provided");
        }

        match self.answer(user_query, records) {
            Ok(answer) => {
                self.audit
                    .log(session_token, AuditEvent::MedicalQuery, "successful_response");
                answer
            }
            Err(e) => {
                tracing::error!("Error processing query: {}", e);
                let (label, reply) = fallback_for(&e);
                self.audit.log(session_token, AuditEvent::MedicalQuery, label);
                reply.to_string()
            }
        }
    }

    fn answer(&self, user_query: &str, records: &[ResultRecord]) -> crate::Result<String> {
        if contains_pii(user_query) {
            tracing::debug!("Redacting PII from user query");
        }
        let sanitized = sanitize(user_query);
        let context = build_context(records);

        let request = self.build_request(&context, &sanitized);
        let response = self.generator.generate(&request)?;

        let trimmed = response.trim();
        if trimmed.is_empty() {
            return Err(AssistantError::EmptyResponse.into());
        }
        Ok(trimmed.to_string())
    }

    fn build_request(&self, context: &str, sanitized_query: &str) -> AssistantRequest {
        AssistantRequest {
            model: self.config.model.clone(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_message: format!("Context:\n{context}\n\nQuestion: {sanitized_query}"),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    /// Tier counts for the given results.
    #[must_use]
    pub fn quick_insights(&self, records: &[ResultRecord]) -> QuickInsights {
        summarize(records)
    }

    /// Starter questions offered to the user.
    #[must_use]
    pub fn suggested_questions(&self) -> &'static [&'static str] {
        &SUGGESTED_QUESTIONS
    }
}

/// Audit label and user-facing reply for a failed query.
fn fallback_for(error: &LabsightError) -> (&'static str, &'static str) {
    match error {
        LabsightError::Assistant(e @ AssistantError::Authentication) => {
            (e.audit_label(), AUTH_FAILURE_REPLY)
        }
        LabsightError::Assistant(e @ AssistantError::RateLimited) => {
            (e.audit_label(), RATE_LIMIT_REPLY)
        }
        LabsightError::Assistant(e) => (e.audit_label(), GENERIC_FAILURE_REPLY),
        LabsightError::Io(_) => ("assistant_error", GENERIC_FAILURE_REPLY),
    }
}
