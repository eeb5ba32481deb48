use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use schemars::JsonSchema;
use secrecy::ExposeSecret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    constants::prompts,
    errors::{AppError, AppResult},
    models::{
        domain::{
            material::GeneratedMaterial, DescriptiveQuestion, GeneratedLessonPlan, McqQuestion,
        },
        dto::request::{GenerateLessonPlanRequest, GenerateMaterialRequest, GenerateQuizRequest},
    },
};

/// Questions returned by quiz generation, before they become a draft.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct GeneratedQuiz {
    pub mcq_questions: Vec<McqQuestion>,
    pub descriptive_questions: Vec<DescriptiveQuestion>,
}

impl GeneratedQuiz {
    pub fn check(&self) -> AppResult<()> {
        if self.mcq_questions.is_empty() && self.descriptive_questions.is_empty() {
            return Err(AppError::GenerationError(
                "Generated quiz contains no questions".to_string(),
            ));
        }
        for (position, question) in self.mcq_questions.iter().enumerate() {
            question
                .check(position)
                .map_err(|e| AppError::GenerationError(format!("Generated quiz rejected: {}", e)))?;
        }
        for (position, question) in self.descriptive_questions.iter().enumerate() {
            question
                .check(position)
                .map_err(|e| AppError::GenerationError(format!("Generated quiz rejected: {}", e)))?;
        }
        Ok(())
    }
}

/// Structured content generation. Lesson plan context, when present, is the
/// serialized plan to align the output with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_lesson_plan(
        &self,
        request: &GenerateLessonPlanRequest,
    ) -> AppResult<GeneratedLessonPlan>;

    async fn generate_quiz(
        &self,
        request: &GenerateQuizRequest,
        lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedQuiz>;

    async fn generate_material(
        &self,
        request: &GenerateMaterialRequest,
        lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedMaterial>;

    /// Free-text answer from the teaching assistant.
    async fn chat(&self, message: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct CompletionEnvelope {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Talks to an OpenAI-compatible chat completion gateway.
pub struct GatewayGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GatewayGenerator {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.ai_gateway_url.clone())
            .with_api_key(config.ai_gateway_api_key.expose_secret().to_string());

        Self {
            client: Client::with_config(openai_config),
            model: config.ai_model.clone(),
        }
    }

    async fn complete<T>(&self, schema_name: &str, system_prompt: &str, user_prompt: String) -> AppResult<T>
    where
        T: DeserializeOwned + JsonSchema,
    {
        let request = completion_request::<T>(&self.model, schema_name, system_prompt, &user_prompt)?;
        let content = self.send(schema_name, request).await?;
        parse_generated(&content)
    }

    async fn send(&self, label: &str, request: serde_json::Value) -> AppResult<String> {
        log::info!("Requesting {} from model {}", label, self.model);
        let envelope: CompletionEnvelope = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| {
                log::error!("Generation gateway call for {} failed: {}", label, e);
                AppError::from(e)
            })?;

        first_content(envelope)
            .ok_or_else(|| AppError::GenerationError(format!("Gateway returned no content for {}", label)))
    }
}

#[async_trait]
impl ContentGenerator for GatewayGenerator {
    async fn generate_lesson_plan(
        &self,
        request: &GenerateLessonPlanRequest,
    ) -> AppResult<GeneratedLessonPlan> {
        self.complete(
            "lesson_plan",
            prompts::LESSON_PLAN_SYSTEM_PROMPT,
            prompts::lesson_plan_prompt(request),
        )
        .await
    }

    async fn generate_quiz(
        &self,
        request: &GenerateQuizRequest,
        lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedQuiz> {
        let quiz: GeneratedQuiz = self
            .complete(
                "quiz",
                prompts::QUIZ_SYSTEM_PROMPT,
                prompts::quiz_prompt(request, lesson_plan_context.as_deref()),
            )
            .await?;
        quiz.check()?;
        Ok(quiz)
    }

    async fn generate_material(
        &self,
        request: &GenerateMaterialRequest,
        lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedMaterial> {
        let material: GeneratedMaterial = self
            .complete(
                "adaptive_material",
                prompts::MATERIAL_SYSTEM_PROMPT,
                prompts::material_prompt(request, lesson_plan_context.as_deref()),
            )
            .await?;
        if material.content.trim().is_empty() {
            return Err(AppError::GenerationError(
                "Generated material has no content".to_string(),
            ));
        }
        Ok(material)
    }

    async fn chat(&self, message: &str) -> AppResult<String> {
        let request = chat_request(&self.model, prompts::CHAT_ASSISTANT_SYSTEM_PROMPT, message);
        let reply = self.send("assistant reply", request).await?;
        Ok(reply.trim().to_string())
    }
}

/// First choice's text, if it has any non-blank content.
fn first_content(envelope: CompletionEnvelope) -> Option<String> {
    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
}

fn chat_request(model: &str, system_prompt: &str, message: &str) -> serde_json::Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": message }
        ]
    })
}

fn completion_request<T: JsonSchema>(
    model: &str,
    schema_name: &str,
    system_prompt: &str,
    user_prompt: &str,
) -> AppResult<serde_json::Value> {
    let schema = serde_json::to_value(schemars::schema_for!(T))?;
    Ok(json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_prompt }
        ],
        "response_format": {
            "type": "json_schema",
            "json_schema": { "name": schema_name, "schema": schema }
        }
    }))
}

/// Parses model output, tolerating a surrounding markdown code fence.
fn parse_generated<T: DeserializeOwned>(content: &str) -> AppResult<T> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| {
        log::warn!("Generated content did not match the expected shape: {}", e);
        AppError::GenerationError(format!("Generated content could not be parsed: {}", e))
    })
}
