use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        FeedbackRepository, LessonPlanRepository, MaterialRepository, MongoFeedbackRepository,
        MongoLessonPlanRepository, MongoMaterialRepository, MongoQuizRepository,
        MongoQuizResponseRepository, QuizRepository, QuizResponseRepository,
    },
    services::{
        assistant_service::AssistantService,
        feedback_service::FeedbackService,
        generation_service::{ContentGenerator, GatewayGenerator},
        lesson_plan_service::LessonPlanService,
        local_history::LocalHistory,
        material_service::MaterialService,
        quiz_service::QuizService,
        session_service::SessionService,
    },
};

/// Storage and generation backends the services are built from.
pub struct Backends {
    pub quizzes: Arc<dyn QuizRepository>,
    pub responses: Arc<dyn QuizResponseRepository>,
    pub lesson_plans: Arc<dyn LessonPlanRepository>,
    pub materials: Arc<dyn MaterialRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub generator: Arc<dyn ContentGenerator>,
}

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub session_service: Arc<SessionService>,
    pub lesson_plan_service: Arc<LessonPlanService>,
    pub material_service: Arc<MaterialService>,
    pub feedback_service: Arc<FeedbackService>,
    pub assistant_service: Arc<AssistantService>,
    pub database: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;
        let responses = Arc::new(MongoQuizResponseRepository::new(&db));
        responses.ensure_indexes().await?;
        let lesson_plans = Arc::new(MongoLessonPlanRepository::new(&db));
        lesson_plans.ensure_indexes().await?;
        let materials = Arc::new(MongoMaterialRepository::new(&db));
        materials.ensure_indexes().await?;
        let feedback = Arc::new(MongoFeedbackRepository::new(&db));
        feedback.ensure_indexes().await?;

        let backends = Backends {
            quizzes,
            responses,
            lesson_plans,
            materials,
            feedback,
            generator: Arc::new(GatewayGenerator::new(&config)),
        };

        let mut state = Self::from_parts(config, backends);
        state.database = Some(db);
        Ok(state)
    }

    /// Wires services over the given backends without touching a database.
    pub fn from_parts(config: Config, backends: Backends) -> Self {
        let history = Arc::new(LocalHistory::new(
            config.local_history_path.clone(),
            config.local_history_capacity,
        ));

        let quiz_service = Arc::new(QuizService::new(
            Arc::clone(&backends.quizzes),
            Arc::clone(&backends.responses),
            Arc::clone(&backends.lesson_plans),
            Arc::clone(&backends.generator),
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&quiz_service),
            Arc::clone(&backends.responses),
        ));
        let lesson_plan_service = Arc::new(LessonPlanService::new(
            Arc::clone(&backends.lesson_plans),
            Arc::clone(&backends.generator),
            history,
        ));
        let material_service = Arc::new(MaterialService::new(
            Arc::clone(&backends.materials),
            Arc::clone(&backends.lesson_plans),
            Arc::clone(&backends.generator),
        ));
        let feedback_service = Arc::new(FeedbackService::new(
            Arc::clone(&backends.feedback),
            Arc::clone(&backends.lesson_plans),
        ));
        let assistant_service = Arc::new(AssistantService::new(backends.generator));

        Self {
            quiz_service,
            session_service,
            lesson_plan_service,
            material_service,
            feedback_service,
            assistant_service,
            database: None,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
