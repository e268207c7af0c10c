//! Assistant port: Trait for the external natural-language answer generator.
//!
//! The network call to a hosted language model lives behind this trait; the
//! core only hands it a prompt and receives an opaque response string.

/// Errors an answer generator can report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssistantError {
    #[error("Assistant authentication failed")]
    Authentication,

    #[error("Assistant rate limit exceeded")]
    RateLimited,

    #[error("Assistant returned an empty response")]
    EmptyResponse,

    #[error("Assistant request failed: {0}")]
    Unavailable(String),
}

impl AssistantError {
    /// Short label recorded in audit entries.
    #[must_use]
    pub fn audit_label(&self) -> &'static str {
        match self {
            Self::Authentication => "authentication_error",
            Self::RateLimited => "rate_limited",
            Self::EmptyResponse => "empty_response",
            Self::Unavailable(_) => "assistant_error",
        }
    }
}

/// A fully assembled request for the assistant.
#[derive(Debug, Clone)]
pub struct AssistantRequest {
    /// Model identifier
    pub model: String,

    /// System instructions
    pub system_prompt: String,

    /// User turn: lab context plus the sanitized question
    pub user_message: String,

    /// Upper bound on generated tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

/// Trait for generating assistant answers.
///
/// Implementations may block on I/O; callers own any timeout policy.
pub trait AnswerGenerator: Send + Sync {
    /// Generate a response for the given request.
    ///
    /// # Errors
    /// Returns `AssistantError` if the backend rejects or fails the request.
    fn generate(&self, request: &AssistantRequest) -> Result<String, AssistantError>;
}
