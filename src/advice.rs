use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CoachError, Result};
use crate::models::{CoachingContext, RiskCategory};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODELS: &[&str] = &["mistralai/mistral-7b-instruct:free"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Best-effort client for the coaching-text endpoint. Holds an ordered list
/// of model identifiers tried in turn; every failure path degrades to the
/// static tip table, so callers always get displayable text back.
pub struct AdviceClient {
    api_key: Option<String>,
    base_url: String,
    models: Vec<String>,
    http: reqwest::Client,
}

impl AdviceClient {
    pub fn new(api_key: Option<String>, base_url: String, models: Vec<String>) -> Self {
        Self {
            api_key,
            base_url,
            models,
            http: reqwest::Client::new(),
        }
    }

    /// Credential and endpoint come from the environment. A missing key is
    /// a normal state, not a startup failure.
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        if api_key.is_none() {
            debug!("no OPENROUTER_API_KEY configured, advice will use fallback tips");
        }
        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let models = DEFAULT_MODELS.iter().map(|name| name.to_string()).collect();
        Self::new(api_key, base_url, models)
    }

    pub async fn get_advice(&self, context: &CoachingContext<'_>) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("skipping upstream call, no credential configured");
            return format_tips(fallback_tips(context.prediction.risk_category));
        };

        let prompt = build_coaching_prompt(context);
        for model in &self.models {
            debug!(model = %model, "requesting coaching advice");
            match self.request_completion(api_key, model, &prompt).await {
                Ok(text) => {
                    debug!(model = %model, "coaching advice received");
                    return text;
                }
                Err(err) => {
                    warn!(model = %model, error = %err, "advice call failed");
                }
            }
        }

        warn!("all advice models failed, using fallback tips");
        format_tips(fallback_tips(context.prediction.risk_category))
    }

    async fn request_completion(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "system", "content": "You are a mental health and wellness expert."},
                {"role": "user", "content": prompt}
            ],
            "max_tokens": 300,
            "temperature": 0.7
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("HTTP-Referer", "http://localhost")
            .header("X-Title", "Burnout Coach")
            .json(&body)
            .send()
            .await
            .map_err(|err| CoachError::Upstream(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CoachError::Upstream(format!("status {status}: {detail}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| CoachError::Upstream(format!("malformed response body: {err}")))?;
        let text = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| CoachError::Upstream("no generated text in response".to_string()))?;

        Ok(text.trim().to_string())
    }
}

fn build_coaching_prompt(context: &CoachingContext<'_>) -> String {
    if let Some(question) = context.follow_up_question {
        return format!(
            "You are an empathetic corporate wellness coach continuing a conversation.\n\
             \n\
             Previous analysis:\n\
             - Burnout score: {:.2}\n\
             - Risk category: {}\n\
             \n\
             The employee's follow-up question: {}\n\
             \n\
             Provide a helpful, concise response (under 150 words) addressing their specific question.",
            context.prediction.burn_rate, context.prediction.risk_category, question
        );
    }

    format!(
        "You are an empathetic and highly knowledgeable corporate wellness coach. Your goal is to provide actionable advice.\n\
         \n\
         Employee's data:\n\
         - Designation level: {}\n\
         - Resource allocation: {} projects\n\
         - Mental fatigue score: {:.1}\n\
         - Days since joining: {}\n\
         - Company type: {}\n\
         - WFH setup available: {}\n\
         \n\
         Analysis result:\n\
         - Predicted burnout score: {:.2}\n\
         - Burnout risk category: {}\n\
         \n\
         Write a concise, encouraging coaching plan (under 200 words) structured as:\n\
         1. Acknowledge and validate\n\
         2. Actionable steps\n\
         3. Positive outlook\n\
         \n\
         Speak to the employee directly, as if you know them and are chatting with them. \
         Do not use name placeholders; keep the tone natural and personal.",
        context.input.designation,
        context.input.resource_allocation,
        context.input.mental_fatigue_score,
        context.days_since_joining,
        context.input.company_type,
        context.input.wfh_setup,
        context.prediction.burn_rate,
        context.prediction.risk_category
    )
}

pub fn fallback_tips(category: RiskCategory) -> &'static [&'static str] {
    match category {
        RiskCategory::High => &[
            "You're under significant pressure; prioritize your well-being.",
            "Speak with your manager about workload.",
            "Schedule a short break or vacation to recharge.",
            "Seeking support from HR or a professional is a strength.",
        ],
        RiskCategory::Moderate => &[
            "Manageable but busy; keep balance.",
            "Try the Pomodoro Technique for focus.",
            "Review tasks for delegation or postponement.",
            "Protect personal time after hours.",
        ],
        RiskCategory::Low => &[
            "You're proactively checking in on well-being!",
            "Maintain your good habits.",
            "Incorporate mindfulness or meditation.",
            "Monitor workload to stay healthy.",
        ],
    }
}

pub fn format_tips(tips: &[&str]) -> String {
    tips.iter()
        .map(|tip| format!("* {tip}"))
        .collect::<Vec<_>>()
        .join("\n")
}
