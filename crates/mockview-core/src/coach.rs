//! The coach: asks the language model for questions and feedback, and
//! falls back to local content whenever the model cannot help.
//!
//! Every public method here is infallible from the caller's point of view.
//! Provider failures are retried when transient, logged, and then replaced
//! by the static question bank, the heuristic feedback, or a fixed notice.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::error::ProviderError;
use crate::feedback::{detailed_feedback, heuristic_feedback, GRADE_FEEDBACK_UNAVAILABLE};
use crate::grade::Grade;
use crate::model::{AnswerFeedback, InterviewConfig};
use crate::prompts::{
    answer_feedback_prompt, grade_feedback_prompt, question_prompt, COACH_SYSTEM_PROMPT,
};
use crate::questions::QuestionSet;
use crate::traits::{GenerateRequest, LlmProvider};

const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);

/// Configuration for the coach.
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    pub temperature: f64,
    /// Token budget for question generation and grade feedback.
    pub max_tokens: u32,
    /// Token budget for feedback on a single answer.
    pub answer_max_tokens: u32,
    /// Retries on transient provider errors.
    pub max_retries: u32,
    /// Initial delay between retries; doubles on each attempt.
    pub retry_delay: Duration,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            answer_max_tokens: 800,
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Overall coaching text for a finished interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeFeedback {
    pub text: String,
    /// `false` when the fixed fallback notice was used.
    pub generated: bool,
}

/// Orchestrates model requests for one user's interviews.
pub struct Coach {
    provider: Option<Arc<dyn LlmProvider>>,
    config: CoachConfig,
}

impl Coach {
    pub fn new(provider: Arc<dyn LlmProvider>, config: CoachConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// A coach with no model: every request uses local fallbacks.
    pub fn offline(config: CoachConfig) -> Self {
        Self {
            provider: None,
            config,
        }
    }

    pub fn is_online(&self) -> bool {
        self.provider.is_some()
    }

    pub fn config(&self) -> &CoachConfig {
        &self.config
    }

    /// Ten questions for the configured role, level, and difficulty.
    pub async fn generate_questions(&self, interview: &InterviewConfig) -> QuestionSet {
        let prompt = question_prompt(interview);
        match self.complete(prompt, self.config.max_tokens, false).await {
            Ok(text) => {
                QuestionSet::from_model_output(&text, interview.difficulty, interview.job_level)
            }
            Err(e) => {
                tracing::warn!("question generation failed, using fallback bank: {e:#}");
                QuestionSet::fallback(interview.difficulty, interview.job_level)
            }
        }
    }

    /// Feedback on a single answer.
    pub async fn answer_feedback(
        &self,
        interview: &InterviewConfig,
        question: &str,
        answer: &str,
    ) -> AnswerFeedback {
        let prompt = answer_feedback_prompt(interview, question, answer);
        match self
            .complete(prompt, self.config.answer_max_tokens, false)
            .await
        {
            Ok(text) => detailed_feedback(&text),
            Err(e) => {
                tracing::warn!("answer feedback failed, using heuristic feedback: {e:#}");
                heuristic_feedback(answer, &interview.job_role)
            }
        }
    }

    /// Overall feedback, with the template picked by grade.
    ///
    /// Failing interviews let the model search the web for current role
    /// requirements.
    pub async fn grade_feedback(
        &self,
        grade: Grade,
        score: u32,
        interview: &InterviewConfig,
        answers: &[String],
    ) -> GradeFeedback {
        let prompt = grade_feedback_prompt(grade, score, interview, answers);
        let web_search = grade == Grade::F;
        match self
            .complete(prompt, self.config.max_tokens, web_search)
            .await
        {
            Ok(text) if !text.trim().is_empty() => GradeFeedback {
                text: text.trim().to_string(),
                generated: true,
            },
            Ok(_) => GradeFeedback {
                text: GRADE_FEEDBACK_UNAVAILABLE.to_string(),
                generated: false,
            },
            Err(e) => {
                tracing::warn!("grade feedback failed: {e:#}");
                GradeFeedback {
                    text: GRADE_FEEDBACK_UNAVAILABLE.to_string(),
                    generated: false,
                }
            }
        }
    }

    /// Send one prompt, retrying transient failures with exponential backoff.
    async fn complete(&self, prompt: String, max_tokens: u32, web_search: bool) -> Result<String> {
        let Some(provider) = &self.provider else {
            anyhow::bail!("no language model provider configured");
        };

        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt,
            system_prompt: Some(COACH_SYSTEM_PROMPT.to_string()),
            max_tokens,
            temperature: self.config.temperature,
            web_search,
        };

        let mut last_error = None;
        let mut retry_delay = self.config.retry_delay;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            match provider.generate(&request).await {
                Ok(response) => {
                    tracing::debug!(
                        provider = provider.name(),
                        model = %response.model,
                        latency_ms = response.latency_ms,
                        tokens = response.token_usage.total_tokens,
                        "model request complete"
                    );
                    return Ok(response.content);
                }
                Err(e) => {
                    if let Some(provider_err) = e.downcast_ref::<ProviderError>() {
                        if provider_err.is_permanent() {
                            return Err(e);
                        }
                        if let Some(ms) = provider_err.retry_after_ms() {
                            retry_delay = Duration::from_millis(ms).min(MAX_RETRY_DELAY);
                        }
                    }
                    tracing::debug!(attempt, "model request failed: {e:#}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("unknown error")))
    }
}
