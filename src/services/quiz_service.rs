use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    auth::{require_owner, Claims},
    constants::prompts,
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizDraft, QuizResponse},
        dto::request::{GenerateQuizRequest, PaginationParams, QuizEditRequest},
    },
    repositories::{LessonPlanRepository, QuizRepository, QuizResponseRepository},
    services::{
        generation_service::ContentGenerator,
        quiz_code::{generate_quiz_code, is_well_formed},
        quiz_editor::{QuizEditor, SaveQuiz},
    },
};

pub const MAX_CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Insert,
    Update,
}

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    responses: Arc<dyn QuizResponseRepository>,
    lesson_plans: Arc<dyn LessonPlanRepository>,
    generator: Arc<dyn ContentGenerator>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        responses: Arc<dyn QuizResponseRepository>,
        lesson_plans: Arc<dyn LessonPlanRepository>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            quizzes,
            responses,
            lesson_plans,
            generator,
        }
    }

    /// Generates an unsaved draft. A referenced lesson plan is loaded and
    /// ownership-checked before the generation call.
    pub async fn generate_draft(
        &self,
        claims: &Claims,
        request: GenerateQuizRequest,
    ) -> AppResult<QuizDraft> {
        request.validate()?;

        let context = match request.lesson_plan_id.as_deref() {
            Some(plan_id) => {
                let plan = self.lesson_plans.find_by_id(plan_id).await?.ok_or_else(|| {
                    AppError::NotFound(format!("Lesson plan with id '{}' not found", plan_id))
                })?;
                require_owner(claims, &plan.user_id)?;
                Some(prompts::lesson_plan_context(&plan))
            }
            None => None,
        };

        let generated = self.generator.generate_quiz(&request, context).await?;
        log::info!(
            "Generated quiz draft '{}' with {} MCQs and {} descriptive questions",
            request.title,
            generated.mcq_questions.len(),
            generated.descriptive_questions.len()
        );

        Ok(QuizDraft {
            title: request.title,
            subject: request.subject,
            grade_level: request.grade_level,
            description: request.description,
            duration: request.duration,
            lesson_plan_id: request.lesson_plan_id,
            mcq_questions: generated.mcq_questions,
            descriptive_questions: generated.descriptive_questions,
            is_published: false,
        })
    }

    pub async fn save(&self, claims: &Claims, save: SaveQuiz) -> AppResult<Quiz> {
        match save {
            SaveQuiz::Create(draft) => {
                draft.check()?;
                let quiz = Quiz::from_draft(draft, claims.user_id());
                let saved = self.persist(quiz, WriteMode::Insert).await?;
                log::info!("Created quiz {} for user {}", saved.id, claims.user_id());
                Ok(saved)
            }
            SaveQuiz::Update { id, draft } => {
                draft.check()?;
                let mut quiz = self.get_for_owner(claims, &id).await?;
                quiz.apply_draft(draft);
                self.persist(quiz, WriteMode::Update).await
            }
        }
    }

    /// Applies indexed edits to a stored quiz and saves the result.
    pub async fn edit(&self, claims: &Claims, id: &str, request: QuizEditRequest) -> AppResult<Quiz> {
        let quiz = self.get_for_owner(claims, id).await?;
        let mut editor = QuizEditor::open(&quiz);
        editor.apply(request)?;
        self.save(claims, editor.into_save()).await
    }

    /// Publishing assigns a code when the quiz has none; unpublishing keeps it.
    pub async fn set_published(&self, claims: &Claims, id: &str, published: bool) -> AppResult<Quiz> {
        let mut quiz = self.get_for_owner(claims, id).await?;
        quiz.is_published = published;
        quiz.updated_at = Some(Utc::now());
        let saved = self.persist(quiz, WriteMode::Update).await?;

        log::info!(
            "Quiz {} is now {} (code {:?})",
            saved.id,
            if published { "published" } else { "unpublished" },
            saved.quiz_code
        );
        Ok(saved)
    }

    pub async fn get_for_owner(&self, claims: &Claims, id: &str) -> AppResult<Quiz> {
        let quiz = self
            .quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))?;
        require_owner(claims, &quiz.user_id)?;
        Ok(quiz)
    }

    pub async fn list_for_user(
        &self,
        claims: &Claims,
        pagination: &PaginationParams,
    ) -> AppResult<(Vec<Quiz>, i64)> {
        self.quizzes
            .list_by_user(claims.user_id(), pagination.offset(), pagination.limit())
            .await
    }

    /// Student entry point. Malformed codes never reach storage.
    pub async fn find_published_by_code(&self, code: &str) -> AppResult<Quiz> {
        let not_found = || AppError::NotFound(format!("No published quiz with code '{}'", code));
        if !is_well_formed(code) {
            return Err(not_found());
        }
        self.quizzes
            .find_published_by_code(code)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn list_responses(&self, claims: &Claims, quiz_id: &str) -> AppResult<Vec<QuizResponse>> {
        let quiz = self.get_for_owner(claims, quiz_id).await?;
        self.responses.list_by_quiz(&quiz.id).await
    }

    async fn persist(&self, mut quiz: Quiz, mode: WriteMode) -> AppResult<Quiz> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let assigned_code = quiz.needs_code();
            if assigned_code {
                quiz.quiz_code = Some(fresh_code());
            }

            let result = match mode {
                WriteMode::Insert => self.quizzes.insert(quiz.clone()).await,
                WriteMode::Update => self.quizzes.update(quiz.clone()).await,
            };

            match result {
                Err(AppError::AlreadyExists(_)) if assigned_code => {
                    log::warn!(
                        "Quiz code {:?} already taken (attempt {}/{})",
                        quiz.quiz_code,
                        attempt,
                        MAX_CODE_ATTEMPTS
                    );
                    quiz.quiz_code = None;
                }
                other => return other,
            }
        }

        Err(AppError::InternalError(format!(
            "Could not assign a unique quiz code after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }
}

fn fresh_code() -> String {
    generate_quiz_code(&mut rand::thread_rng())
}
