#![allow(dead_code)]

use std::{collections::HashMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use sahayak_server::{
    app_state::{AppState, Backends},
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{
            lesson_plan::LessonActivity,
            material::{GeneratedMaterial, MaterialQuestion},
            AdaptiveMaterial, DescriptiveQuestion, GeneratedLessonPlan, LessonFeedback, LessonPlan,
            McqQuestion, Quiz, QuizDraft, QuizResponse,
        },
        dto::request::{GenerateLessonPlanRequest, GenerateMaterialRequest, GenerateQuizRequest},
    },
    repositories::{
        FeedbackRepository, LessonPlanRepository, MaterialRepository, QuizRepository,
        QuizResponseRepository,
    },
    services::generation_service::{ContentGenerator, GeneratedQuiz},
};

pub const JWT_SECRET: &str = "integration_test_secret_with_enough_length";
pub const JWT_AUDIENCE: &str = "authenticated";

fn paginate<T: Clone>(items: Vec<T>, offset: i64, limit: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let start = offset.max(0) as usize;
    let end = (start + limit.max(0) as usize).min(items.len());

    let page = if start >= items.len() {
        vec![]
    } else {
        items[start..end].to_vec()
    };

    (page, total)
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: Arc<RwLock<HashMap<String, Quiz>>>,
}

impl InMemoryQuizRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn code_taken(quizzes: &HashMap<String, Quiz>, quiz: &Quiz) -> bool {
        match quiz.quiz_code.as_deref() {
            Some(code) => quizzes
                .values()
                .any(|q| q.id != quiz.id && q.quiz_code.as_deref() == Some(code)),
            None => false,
        }
    }
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn find_published_by_code(&self, code: &str) -> AppResult<Option<Quiz>> {
        let quizzes = self.quizzes.read().await;
        Ok(quizzes
            .values()
            .find(|q| q.is_published && q.quiz_code.as_deref() == Some(code))
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str, offset: i64, limit: i64) -> AppResult<(Vec<Quiz>, i64)> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<_> = quizzes
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, offset, limit))
    }

    async fn insert(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if quizzes.contains_key(&quiz.id) || Self::code_taken(&quizzes, &quiz) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz '{}' violates a unique index",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn update(&self, quiz: Quiz) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        if !quizzes.contains_key(&quiz.id) {
            return Err(AppError::NotFound(format!("Quiz with id '{}' not found", quiz.id)));
        }
        if Self::code_taken(&quizzes, &quiz) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz '{}' violates a unique index",
                quiz.id
            )));
        }
        quizzes.insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }
}

#[derive(Default)]
pub struct InMemoryQuizResponseRepository {
    responses: Arc<RwLock<Vec<QuizResponse>>>,
}

impl InMemoryQuizResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.responses.read().await.len()
    }
}

#[async_trait]
impl QuizResponseRepository for InMemoryQuizResponseRepository {
    async fn insert(&self, response: QuizResponse) -> AppResult<QuizResponse> {
        let mut responses = self.responses.write().await;
        if responses.iter().any(|r| r.id == response.id) {
            return Err(AppError::AlreadyExists(format!(
                "Quiz response '{}' already exists",
                response.id
            )));
        }
        responses.push(response.clone());
        Ok(response)
    }

    async fn list_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<QuizResponse>> {
        let responses = self.responses.read().await;
        let mut items: Vec<_> = responses
            .iter()
            .filter(|r| r.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryLessonPlanRepository {
    plans: Arc<RwLock<HashMap<String, LessonPlan>>>,
}

impl InMemoryLessonPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LessonPlanRepository for InMemoryLessonPlanRepository {
    async fn create(&self, plan: LessonPlan) -> AppResult<LessonPlan> {
        let mut plans = self.plans.write().await;
        if plans.contains_key(&plan.id) {
            return Err(AppError::AlreadyExists(format!(
                "Lesson plan with id '{}' already exists",
                plan.id
            )));
        }
        plans.insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<LessonPlan>> {
        Ok(self.plans.read().await.get(id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<LessonPlan>, i64)> {
        let plans = self.plans.read().await;
        let mut items: Vec<_> = plans
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, offset, limit))
    }

    async fn set_favorite(&self, id: &str, is_favorite: bool) -> AppResult<Option<LessonPlan>> {
        let mut plans = self.plans.write().await;
        Ok(plans.get_mut(id).map(|plan| {
            plan.is_favorite = is_favorite;
            plan.updated_at = Some(Utc::now());
            plan.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryMaterialRepository {
    materials: Arc<RwLock<HashMap<String, AdaptiveMaterial>>>,
}

impl InMemoryMaterialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MaterialRepository for InMemoryMaterialRepository {
    async fn create(&self, material: AdaptiveMaterial) -> AppResult<AdaptiveMaterial> {
        let mut materials = self.materials.write().await;
        if materials.contains_key(&material.id) {
            return Err(AppError::AlreadyExists(format!(
                "Material with id '{}' already exists",
                material.id
            )));
        }
        materials.insert(material.id.clone(), material.clone());
        Ok(material)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<AdaptiveMaterial>> {
        Ok(self.materials.read().await.get(id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<AdaptiveMaterial>, i64)> {
        let materials = self.materials.read().await;
        let mut items: Vec<_> = materials
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, offset, limit))
    }
}

#[derive(Default)]
pub struct InMemoryFeedbackRepository {
    feedback: Arc<RwLock<Vec<LessonFeedback>>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn create(&self, feedback: LessonFeedback) -> AppResult<LessonFeedback> {
        self.feedback.write().await.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_by_lesson_plan(&self, lesson_plan_id: &str) -> AppResult<Vec<LessonFeedback>> {
        let feedback = self.feedback.read().await;
        let mut items: Vec<_> = feedback
            .iter()
            .filter(|f| f.lesson_plan_id == lesson_plan_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }
}

/// Deterministic generator standing in for the AI gateway.
pub struct StubGenerator;

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate_lesson_plan(
        &self,
        request: &GenerateLessonPlanRequest,
    ) -> AppResult<GeneratedLessonPlan> {
        Ok(generated_lesson_plan(&request.topic))
    }

    async fn generate_quiz(
        &self,
        _request: &GenerateQuizRequest,
        _lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedQuiz> {
        let draft = quiz_draft();
        Ok(GeneratedQuiz {
            mcq_questions: draft.mcq_questions,
            descriptive_questions: draft.descriptive_questions,
        })
    }

    async fn generate_material(
        &self,
        request: &GenerateMaterialRequest,
        _lesson_plan_context: Option<String>,
    ) -> AppResult<GeneratedMaterial> {
        Ok(GeneratedMaterial {
            content: format!("Reading about {}", request.title),
            questions: vec![MaterialQuestion {
                question: "What did you learn?".to_string(),
                question_type: "short_answer".to_string(),
            }],
            instructions: "Read carefully".to_string(),
            duration: 20,
        })
    }

    async fn chat(&self, message: &str) -> AppResult<String> {
        Ok(format!("Here is one idea for \"{}\": start with a short warm-up.", message))
    }
}

pub fn generated_lesson_plan(topic: &str) -> GeneratedLessonPlan {
    GeneratedLessonPlan {
        title: format!("Exploring {}", topic),
        objectives: vec!["Describe the process".to_string()],
        materials_needed: vec!["Leaves".to_string(), "Hand lens".to_string()],
        introduction: "Ask what plants eat".to_string(),
        main_activities: vec![LessonActivity {
            activity: "Leaf observation".to_string(),
            time: 15,
            description: "Look at leaves under a lens".to_string(),
        }],
        assessment: "Exit ticket".to_string(),
        differentiation: "Pair readers".to_string(),
        closure: "Recap".to_string(),
        homework: None,
    }
}

pub fn quiz_draft() -> QuizDraft {
    QuizDraft {
        title: "Arithmetic check".to_string(),
        subject: "Math".to_string(),
        grade_level: "3".to_string(),
        description: None,
        duration: None,
        lesson_plan_id: None,
        mcq_questions: vec![
            McqQuestion {
                question: "2 + 2".to_string(),
                options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
                correct_option: 1,
                points: 1,
            },
            McqQuestion {
                question: "3 * 3".to_string(),
                options: vec!["6".into(), "9".into(), "33".into()],
                correct_option: 1,
                points: 1,
            },
        ],
        descriptive_questions: vec![DescriptiveQuestion {
            question: "Explain carrying".to_string(),
            suggested_answer: "Move the extra ten to the next column".to_string(),
            points: 5,
        }],
        is_published: false,
    }
}

pub fn test_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "sahayak-integration".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        cors_allowed_origin: None,
        auth_jwt_secret: SecretString::from(JWT_SECRET.to_string()),
        auth_jwt_audience: JWT_AUDIENCE.to_string(),
        ai_gateway_url: "http://localhost:9999/v1".to_string(),
        ai_gateway_api_key: SecretString::from("test_gateway_key".to_string()),
        ai_model: "test-model".to_string(),
        local_history_path: temp_history_path(),
        local_history_capacity: 50,
    }
}

pub fn temp_history_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("sahayak-it-{}", Uuid::new_v4()))
        .join("history.json")
}

pub struct TestBackends {
    pub responses: Arc<InMemoryQuizResponseRepository>,
    pub state: AppState,
}

pub fn test_state() -> TestBackends {
    let responses = Arc::new(InMemoryQuizResponseRepository::new());
    let backends = Backends {
        quizzes: Arc::new(InMemoryQuizRepository::new()),
        responses: Arc::clone(&responses) as Arc<dyn QuizResponseRepository>,
        lesson_plans: Arc::new(InMemoryLessonPlanRepository::new()),
        materials: Arc::new(InMemoryMaterialRepository::new()),
        feedback: Arc::new(InMemoryFeedbackRepository::new()),
        generator: Arc::new(StubGenerator),
    };

    TestBackends {
        responses,
        state: AppState::from_parts(test_config(), backends),
    }
}

pub fn bearer(user_id: &str) -> String {
    let exp = (Utc::now().timestamp() + 3600) as usize;
    let claims = json!({
        "sub": user_id,
        "email": format!("{}@school.test", user_id),
        "role": "authenticated",
        "aud": JWT_AUDIENCE,
        "exp": exp,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("token should encode");
    format!("Bearer {}", token)
}
