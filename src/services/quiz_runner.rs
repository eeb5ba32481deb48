use serde::Serialize;
use tokio::time::Instant;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizResponse},
        dto::{quiz_dto::StudentQuizDto, request::NavigateRequest, response::SessionView},
    },
};

/// Outcome of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running(u64),
    /// Returned once, on the step that reaches zero.
    Expired,
    Idle,
}

#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u64,
    fired: bool,
}

impl Countdown {
    pub fn from_seconds(seconds: u64) -> Self {
        Self {
            remaining: seconds,
            fired: false,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn tick(&mut self) -> Tick {
        if self.fired {
            return Tick::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.fired = true;
            Tick::Expired
        } else {
            Tick::Running(self.remaining)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct McqScore {
    pub correct: usize,
    pub total: usize,
}

/// Counts the multiple-choice questions answered with the stored correct
/// index. Descriptive answers are never graded.
pub fn score_mcq(quiz: &Quiz, answers: &[Option<usize>]) -> McqScore {
    let correct = quiz
        .mcq_questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(**answer))
        .count();

    McqScore {
        correct,
        total: quiz.mcq_questions.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerStatus {
    Ready,
    Submitted,
    Expired,
    Failed,
}

impl RunnerStatus {
    /// Every state but `Ready` is terminal.
    pub fn is_finished(self) -> bool {
        self != RunnerStatus::Ready
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    Timeout,
}

/// One student's attempt at a published quiz.
#[derive(Debug)]
pub struct QuizRunner {
    quiz: Quiz,
    student_name: String,
    student_roll: Option<String>,
    mcq_answers: Vec<Option<usize>>,
    descriptive_answers: Vec<String>,
    current_index: usize,
    started_at: Instant,
    countdown: Option<Countdown>,
    status: RunnerStatus,
    score: Option<McqScore>,
    error: Option<String>,
}

impl QuizRunner {
    pub fn new(quiz: Quiz) -> Self {
        let countdown = quiz.time_limit_seconds().map(Countdown::from_seconds);
        let mcq_answers = vec![None; quiz.mcq_questions.len()];
        let descriptive_answers = vec![String::new(); quiz.descriptive_questions.len()];

        Self {
            quiz,
            student_name: String::new(),
            student_roll: None,
            mcq_answers,
            descriptive_answers,
            current_index: 0,
            started_at: Instant::now(),
            countdown,
            status: RunnerStatus::Ready,
            score: None,
            error: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn status(&self) -> RunnerStatus {
        self.status
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> Option<McqScore> {
        self.score
    }

    pub fn is_timed(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    fn ensure_ready(&self) -> AppResult<()> {
        if self.status != RunnerStatus::Ready {
            return Err(AppError::ValidationError(
                "This quiz session is no longer accepting answers".to_string(),
            ));
        }
        Ok(())
    }

    pub fn set_student(&mut self, name: &str, roll: Option<&str>) -> AppResult<()> {
        self.ensure_ready()?;
        self.student_name = name.to_string();
        self.student_roll = roll.map(str::to_string);
        Ok(())
    }

    pub fn select_option(&mut self, question: usize, option: usize) -> AppResult<()> {
        self.ensure_ready()?;
        let mcq = self.quiz.mcq_questions.get(question).ok_or_else(|| {
            AppError::ValidationError(format!("Question {} does not exist", question + 1))
        })?;
        if option >= mcq.options.len() {
            return Err(AppError::ValidationError(format!(
                "Question {} has no option {}",
                question + 1,
                option + 1
            )));
        }
        self.mcq_answers[question] = Some(option);
        Ok(())
    }

    pub fn set_descriptive(&mut self, question: usize, answer: &str) -> AppResult<()> {
        self.ensure_ready()?;
        let slot = self.descriptive_answers.get_mut(question).ok_or_else(|| {
            AppError::ValidationError(format!(
                "Descriptive question {} does not exist",
                question + 1
            ))
        })?;
        *slot = answer.to_string();
        Ok(())
    }

    /// Moves between multiple-choice questions. Prev and next clamp at the
    /// ends; a jump outside the range is rejected.
    pub fn navigate(&mut self, action: NavigateRequest) -> AppResult<usize> {
        let last = self.quiz.mcq_questions.len().saturating_sub(1);
        self.current_index = match action {
            NavigateRequest::Prev => self.current_index.saturating_sub(1),
            NavigateRequest::Next => (self.current_index + 1).min(last),
            NavigateRequest::Jump { index } => {
                if index >= self.quiz.mcq_questions.len() {
                    return Err(AppError::ValidationError(format!(
                        "Question {} does not exist",
                        index + 1
                    )));
                }
                index
            }
        };
        Ok(self.current_index)
    }

    /// Advances the countdown while the attempt is still open.
    pub fn tick(&mut self) -> Tick {
        if self.status != RunnerStatus::Ready {
            return Tick::Idle;
        }
        match self.countdown.as_mut() {
            Some(countdown) => countdown.tick(),
            None => Tick::Idle,
        }
    }

    /// Builds the response to store. A manual submission without a name is
    /// rejected and the attempt stays open; a timed-out one without a name
    /// ends as `Expired` and nothing is stored.
    pub fn prepare_submission(&mut self, trigger: SubmitTrigger) -> AppResult<Option<QuizResponse>> {
        self.ensure_ready()?;

        if self.student_name.trim().is_empty() {
            return match trigger {
                SubmitTrigger::Manual => Err(AppError::ValidationError(
                    "Please enter your name before submitting".to_string(),
                )),
                SubmitTrigger::Timeout => {
                    log::warn!(
                        "Time ran out on quiz {} before a student name was entered; nothing was stored",
                        self.quiz.id
                    );
                    self.status = RunnerStatus::Expired;
                    self.error = Some("Time is up. No name was entered, so the quiz was not submitted.".to_string());
                    Ok(None)
                }
            };
        }

        let elapsed = self.started_at.elapsed().as_secs();
        Ok(Some(QuizResponse::for_quiz(
            &self.quiz,
            &self.student_name,
            self.student_roll.as_deref(),
            &self.mcq_answers,
            &self.descriptive_answers,
            elapsed,
        )))
    }

    pub fn mark_submitted(&mut self) -> McqScore {
        let score = score_mcq(&self.quiz, &self.mcq_answers);
        self.status = RunnerStatus::Submitted;
        self.score = Some(score);
        self.error = None;
        score
    }

    pub fn mark_failed(&mut self, reason: &str) {
        self.status = RunnerStatus::Failed;
        self.error = Some(reason.to_string());
    }

    pub fn view(&self, session_id: &str) -> SessionView {
        SessionView {
            session_id: session_id.to_string(),
            status: self.status,
            quiz: StudentQuizDto::from(&self.quiz),
            student_name: self.student_name.clone(),
            student_roll: self.student_roll.clone(),
            current_index: self.current_index,
            mcq_answers: self.mcq_answers.clone(),
            descriptive_answers: self.descriptive_answers.clone(),
            remaining_seconds: self.remaining_seconds(),
            score: self.score,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    fn runner() -> QuizRunner {
        QuizRunner::new(fixtures::published_quiz("ABCDEF"))
    }

    #[test]
    fn countdown_for_ten_minutes_fires_once_after_600_ticks() {
        let mut runner = runner();
        assert_eq!(runner.remaining_seconds(), Some(600));

        let mut expirations = 0;
        for _ in 0..600 {
            if runner.tick() == Tick::Expired {
                expirations += 1;
            }
        }
        assert_eq!(runner.remaining_seconds(), Some(0));
        assert_eq!(expirations, 1);
        assert_eq!(runner.tick(), Tick::Idle);
    }

    #[test]
    fn countdown_reports_remaining_seconds() {
        let mut countdown = Countdown::from_seconds(3);
        assert_eq!(countdown.tick(), Tick::Running(2));
        assert_eq!(countdown.tick(), Tick::Running(1));
        assert_eq!(countdown.tick(), Tick::Expired);
        assert_eq!(countdown.tick(), Tick::Idle);
    }

    #[test]
    fn untimed_quiz_has_no_countdown() {
        let mut quiz = fixtures::published_quiz("ABCDEF");
        quiz.duration = Some(0);
        let mut runner = QuizRunner::new(quiz);

        assert!(!runner.is_timed());
        assert_eq!(runner.tick(), Tick::Idle);
    }

    #[test]
    fn score_counts_matching_indices_only() {
        let quiz = fixtures::published_quiz("ABCDEF");

        let all_right = score_mcq(&quiz, &[Some(1), Some(1)]);
        assert_eq!(all_right, McqScore { correct: 2, total: 2 });

        let mixed = score_mcq(&quiz, &[Some(0), None]);
        assert_eq!(mixed.correct, 0);

        let extra = score_mcq(&quiz, &[Some(1), Some(1), Some(1)]);
        assert!(extra.correct <= extra.total);
    }

    #[test]
    fn manual_submit_without_name_is_rejected_and_stays_ready() {
        let mut runner = runner();
        runner.set_student("   ", None).unwrap();

        let result = runner.prepare_submission(SubmitTrigger::Manual);

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(runner.status(), RunnerStatus::Ready);
    }

    #[test]
    fn timeout_without_name_expires_without_response() {
        let mut runner = runner();

        let result = runner.prepare_submission(SubmitTrigger::Timeout).unwrap();

        assert!(result.is_none());
        assert_eq!(runner.status(), RunnerStatus::Expired);
        assert!(runner.select_option(0, 1).is_err());
    }

    #[test]
    fn submission_carries_answers_and_locks_runner() {
        let mut runner = runner();
        runner.set_student("Asha", Some("14")).unwrap();
        runner.select_option(0, 1).unwrap();
        runner.set_descriptive(0, "carry the one").unwrap();

        let response = runner
            .prepare_submission(SubmitTrigger::Manual)
            .unwrap()
            .expect("named submission produces a response");
        assert_eq!(response.mcq_answers, vec![Some(1), None]);
        assert_eq!(response.descriptive_answers, vec!["carry the one".to_string()]);
        assert_eq!(response.student_roll.as_deref(), Some("14"));

        let score = runner.mark_submitted();
        assert_eq!(score, McqScore { correct: 1, total: 2 });
        assert_eq!(runner.status(), RunnerStatus::Submitted);
        assert!(runner.prepare_submission(SubmitTrigger::Manual).is_err());
        assert!(runner.set_descriptive(0, "late edit").is_err());
    }

    #[test]
    fn select_option_validates_indices() {
        let mut runner = runner();
        assert!(runner.select_option(5, 0).is_err());
        assert!(runner.select_option(1, 3).is_err());
        assert!(runner.select_option(1, 2).is_ok());
    }

    #[test]
    fn navigation_clamps_and_validates_jumps() {
        let mut runner = runner();

        assert_eq!(runner.navigate(NavigateRequest::Prev).unwrap(), 0);
        assert_eq!(runner.navigate(NavigateRequest::Next).unwrap(), 1);
        assert_eq!(runner.navigate(NavigateRequest::Next).unwrap(), 1);
        assert_eq!(runner.navigate(NavigateRequest::Jump { index: 0 }).unwrap(), 0);
        assert!(runner.navigate(NavigateRequest::Jump { index: 2 }).is_err());
        assert_eq!(runner.current_index(), 0);
    }

    #[test]
    fn navigation_without_mcqs_stays_on_first_slot() {
        let mut quiz = fixtures::published_quiz("ABCDEF");
        quiz.mcq_questions.clear();
        let mut runner = QuizRunner::new(quiz);

        assert_eq!(runner.navigate(NavigateRequest::Next).unwrap(), 0);
        assert_eq!(runner.navigate(NavigateRequest::Prev).unwrap(), 0);
        assert!(matches!(
            runner.navigate(NavigateRequest::Jump { index: 0 }),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(runner.current_index(), 0);
    }

    #[test]
    fn unanswered_submission_keeps_full_answer_shape() {
        let mut runner = runner();
        runner.set_student("Asha", None).unwrap();

        let response = runner
            .prepare_submission(SubmitTrigger::Manual)
            .unwrap()
            .expect("named submission produces a response");
        assert_eq!(response.mcq_answers, vec![None, None]);
        assert_eq!(response.descriptive_answers, vec![String::new()]);

        let score = runner.mark_submitted();
        assert_eq!(score, McqScore { correct: 0, total: 2 });
    }

    #[test]
    fn descriptive_only_quiz_submits_with_empty_mcq_answers() {
        let mut quiz = fixtures::published_quiz("ABCDEF");
        quiz.mcq_questions.clear();
        let mut runner = QuizRunner::new(quiz);
        runner.set_student("Ravi", Some("4")).unwrap();
        runner.set_descriptive(0, "Carry the ten").unwrap();

        let response = runner
            .prepare_submission(SubmitTrigger::Manual)
            .unwrap()
            .expect("named submission produces a response");
        assert!(response.mcq_answers.is_empty());
        assert_eq!(response.descriptive_answers, vec!["Carry the ten".to_string()]);
        assert_eq!(runner.mark_submitted(), McqScore { correct: 0, total: 0 });
    }

    #[test]
    fn failed_submission_is_reported_in_view() {
        let mut runner = runner();
        runner.mark_failed("Failed to submit quiz");

        let view = runner.view("s-1");
        assert_eq!(view.status, RunnerStatus::Failed);
        assert_eq!(view.error.as_deref(), Some("Failed to submit quiz"));
        assert!(view.score.is_none());
    }
}
