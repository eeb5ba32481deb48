use std::{
    collections::HashMap,
    sync::{Arc, Weak},
    time::Duration,
};

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time::Instant,
};
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{request::NavigateRequest, response::SessionView},
    repositories::QuizResponseRepository,
    services::{
        quiz_runner::{QuizRunner, SubmitTrigger, Tick},
        quiz_service::QuizService,
    },
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);
/// How long a finished session stays readable after its last access.
pub const FINISHED_RETENTION: Duration = Duration::from_secs(10 * 60);
/// How long an untimed session may sit without any request.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

type SessionMap = RwLock<HashMap<String, Arc<QuizSession>>>;

/// A live student attempt. The runner mutex serializes answer updates,
/// manual submission and the countdown.
pub struct QuizSession {
    id: String,
    runner: Mutex<QuizRunner>,
    timer: Mutex<Option<JoinHandle<()>>>,
    touched: Mutex<Instant>,
}

impl QuizSession {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn view(&self) -> SessionView {
        self.runner.lock().await.view(&self.id)
    }

    async fn stop_timer(&self) {
        if let Some(handle) = self.timer.lock().await.take() {
            handle.abort();
        }
    }

    async fn touch(&self) {
        *self.touched.lock().await = Instant::now();
    }

    /// Finished sessions go after `FINISHED_RETENTION`, untimed open ones
    /// after `IDLE_TIMEOUT`. Timed open sessions are left to their countdown,
    /// and a session whose runner is busy is never stale.
    async fn is_stale(&self, now: Instant) -> bool {
        let Ok(runner) = self.runner.try_lock() else {
            return false;
        };
        let idle = now.saturating_duration_since(*self.touched.lock().await);

        if runner.status().is_finished() {
            idle >= FINISHED_RETENTION
        } else {
            !runner.is_timed() && idle >= IDLE_TIMEOUT
        }
    }
}

pub struct SessionService {
    quizzes: Arc<QuizService>,
    responses: Arc<dyn QuizResponseRepository>,
    sessions: Arc<SessionMap>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl SessionService {
    pub fn new(quizzes: Arc<QuizService>, responses: Arc<dyn QuizResponseRepository>) -> Self {
        Self {
            quizzes,
            responses,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            sweeper: Mutex::new(None),
        }
    }

    /// Looks up a published quiz by code and opens a session for it. Nothing
    /// is created when the lookup fails.
    pub async fn start_session(&self, code: &str) -> AppResult<SessionView> {
        let quiz = self.quizzes.find_published_by_code(code).await?;
        let runner = QuizRunner::new(quiz);
        let timed = runner.is_timed();

        let session = Arc::new(QuizSession {
            id: Uuid::new_v4().to_string(),
            runner: Mutex::new(runner),
            timer: Mutex::new(None),
            touched: Mutex::new(Instant::now()),
        });

        if timed {
            let handle = spawn_countdown(Arc::downgrade(&session), Arc::clone(&self.responses));
            *session.timer.lock().await = Some(handle);
        }

        self.sessions
            .write()
            .await
            .insert(session.id.clone(), Arc::clone(&session));
        self.ensure_sweeper().await;

        log::info!("Started quiz session {} for code {}", session.id, code);
        Ok(session.view().await)
    }

    pub async fn get(&self, session_id: &str) -> AppResult<Arc<QuizSession>> {
        let session = self
            .sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Quiz session '{}' not found", session_id)))?;

        session.touch().await;
        Ok(session)
    }

    pub async fn view(&self, session_id: &str) -> AppResult<SessionView> {
        Ok(self.get(session_id).await?.view().await)
    }

    pub async fn set_student(
        &self,
        session_id: &str,
        name: &str,
        roll: Option<&str>,
    ) -> AppResult<SessionView> {
        let session = self.get(session_id).await?;
        let mut runner = session.runner.lock().await;
        runner.set_student(name, roll)?;
        Ok(runner.view(&session.id))
    }

    pub async fn select_option(
        &self,
        session_id: &str,
        question: usize,
        option: usize,
    ) -> AppResult<SessionView> {
        let session = self.get(session_id).await?;
        let mut runner = session.runner.lock().await;
        runner.select_option(question, option)?;
        Ok(runner.view(&session.id))
    }

    pub async fn answer_descriptive(
        &self,
        session_id: &str,
        question: usize,
        answer: &str,
    ) -> AppResult<SessionView> {
        let session = self.get(session_id).await?;
        let mut runner = session.runner.lock().await;
        runner.set_descriptive(question, answer)?;
        Ok(runner.view(&session.id))
    }

    pub async fn navigate(&self, session_id: &str, action: NavigateRequest) -> AppResult<SessionView> {
        let session = self.get(session_id).await?;
        let mut runner = session.runner.lock().await;
        runner.navigate(action)?;
        Ok(runner.view(&session.id))
    }

    pub async fn submit(&self, session_id: &str) -> AppResult<SessionView> {
        let session = self.get(session_id).await?;
        let view = {
            let mut runner = session.runner.lock().await;
            submit_locked(&session.id, &mut runner, SubmitTrigger::Manual, self.responses.as_ref())
                .await?;
            runner.view(&session.id)
        };
        session.stop_timer().await;
        Ok(view)
    }

    /// Drops the session and tears down its countdown.
    pub async fn end(&self, session_id: &str) -> AppResult<()> {
        let session = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| AppError::NotFound(format!("Quiz session '{}' not found", session_id)))?;

        session.stop_timer().await;
        log::info!("Ended quiz session {}", session_id);
        Ok(())
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Removes stale sessions now and returns how many went.
    pub async fn sweep(&self) -> usize {
        sweep_stale(&self.sessions).await
    }

    async fn ensure_sweeper(&self) {
        let mut sweeper = self.sweeper.lock().await;
        if sweeper.is_none() {
            *sweeper = Some(spawn_sweeper(Arc::downgrade(&self.sessions)));
        }
    }
}

impl Drop for SessionService {
    fn drop(&mut self) {
        if let Some(handle) = self.sweeper.get_mut().take() {
            handle.abort();
        }
    }
}

async fn sweep_stale(sessions: &SessionMap) -> usize {
    let now = Instant::now();
    let mut stale = Vec::new();
    for (id, session) in sessions.read().await.iter() {
        if session.is_stale(now).await {
            stale.push(id.clone());
        }
    }
    if stale.is_empty() {
        return 0;
    }

    let removed: Vec<Arc<QuizSession>> = {
        let mut map = sessions.write().await;
        stale.iter().filter_map(|id| map.remove(id)).collect()
    };
    for session in &removed {
        session.stop_timer().await;
    }

    log::info!("Swept {} stale quiz sessions", removed.len());
    removed.len()
}

fn spawn_sweeper(sessions: Weak<SessionMap>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(sessions) = sessions.upgrade() else {
                break;
            };
            sweep_stale(&sessions).await;
        }
    })
}

/// Stores one response. Validation failures leave the runner open; a storage
/// failure moves it to `Failed`.
async fn submit_locked(
    session_id: &str,
    runner: &mut QuizRunner,
    trigger: SubmitTrigger,
    responses: &dyn QuizResponseRepository,
) -> AppResult<()> {
    let Some(response) = runner.prepare_submission(trigger)? else {
        return Ok(());
    };

    match responses.insert(response).await {
        Ok(saved) => {
            let score = runner.mark_submitted();
            log::info!(
                "Session {} submitted response {} ({:?}, {}/{} MCQs correct)",
                session_id,
                saved.id,
                trigger,
                score.correct,
                score.total
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to store response for session {}: {}", session_id, e);
            runner.mark_failed("Failed to submit quiz");
            Err(e)
        }
    }
}

fn spawn_countdown(
    session: Weak<QuizSession>,
    responses: Arc<dyn QuizResponseRepository>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(session) = session.upgrade() else {
                break;
            };

            let mut runner = session.runner.lock().await;
            match runner.tick() {
                Tick::Running(_) => {}
                Tick::Idle => break,
                Tick::Expired => {
                    log::info!("Time is up for session {}", session.id);
                    // Errors are already recorded on the runner.
                    let _ = submit_locked(
                        &session.id,
                        &mut runner,
                        SubmitTrigger::Timeout,
                        responses.as_ref(),
                    )
                    .await;
                    drop(runner);
                    session.touch().await;
                    break;
                }
            }
        }
    })
}
