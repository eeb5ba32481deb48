#[cfg(test)]
pub mod fixtures {
    use crate::{
        auth::Claims,
        models::domain::{
            lesson_plan::LessonActivity, DescriptiveQuestion, GeneratedLessonPlan, LessonPlan,
            McqQuestion, Quiz, QuizDraft,
        },
    };

    /// Claims as the hosted provider would issue them for `user_id`.
    pub fn claims(user_id: &str) -> Claims {
        Claims {
            sub: user_id.to_string(),
            email: Some(format!("{}@example.com", user_id)),
            role: Some("authenticated".to_string()),
            aud: Some("authenticated".to_string()),
            exp: 9_999_999_999,
            iat: Some(0),
        }
    }

    /// Two one-point MCQs and one five-point descriptive question.
    pub fn quiz_draft() -> QuizDraft {
        QuizDraft {
            title: "Arithmetic check".to_string(),
            subject: "Math".to_string(),
            grade_level: "3".to_string(),
            description: Some("Warm-up quiz".to_string()),
            duration: None,
            lesson_plan_id: None,
            mcq_questions: vec![
                McqQuestion {
                    question: "What is 2 + 2?".to_string(),
                    options: vec!["3".into(), "4".into(), "5".into(), "22".into()],
                    correct_option: 1,
                    points: 1,
                },
                McqQuestion {
                    question: "What is 3 x 3?".to_string(),
                    options: vec!["6".into(), "9".into(), "33".into()],
                    correct_option: 1,
                    points: 1,
                },
            ],
            descriptive_questions: vec![DescriptiveQuestion {
                question: "Explain how you add two-digit numbers.".to_string(),
                suggested_answer: "Add the ones, carry, then add the tens.".to_string(),
                points: 5,
            }],
            is_published: false,
        }
    }

    /// A published ten-minute quiz owned by `teacher-1`.
    pub fn published_quiz(code: &str) -> Quiz {
        let mut draft = quiz_draft();
        draft.duration = Some(10);
        draft.is_published = true;

        let mut quiz = Quiz::from_draft(draft, "teacher-1");
        quiz.quiz_code = Some(code.to_string());
        quiz
    }

    pub fn generated_lesson_plan() -> GeneratedLessonPlan {
        GeneratedLessonPlan {
            title: "How plants make food".to_string(),
            objectives: vec![
                "Describe photosynthesis".to_string(),
                "Name its inputs and outputs".to_string(),
            ],
            materials_needed: vec!["Leaves".to_string(), "Chart paper".to_string()],
            introduction: "Ask what plants eat.".to_string(),
            main_activities: vec![
                LessonActivity {
                    activity: "Leaf observation".to_string(),
                    time: 15,
                    description: "Groups examine leaves under a hand lens.".to_string(),
                },
                LessonActivity {
                    activity: "Diagram".to_string(),
                    time: 20,
                    description: "Draw the photosynthesis cycle.".to_string(),
                },
            ],
            assessment: "Exit ticket with three questions.".to_string(),
            differentiation: "Picture cards for early readers.".to_string(),
            closure: "Recap on the board.".to_string(),
            homework: Some("Find three green plants at home.".to_string()),
        }
    }

    pub fn lesson_plan(user_id: &str) -> LessonPlan {
        LessonPlan::from_generated(
            generated_lesson_plan(),
            user_id,
            "Science",
            "6",
            "Photosynthesis",
            45,
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_quiz_draft_is_valid() {
        let draft = quiz_draft();
        assert!(draft.check().is_ok());
        assert_eq!(draft.total_points(), 7);
    }

    #[test]
    fn test_fixtures_published_quiz() {
        let quiz = published_quiz("QWERTY");
        assert!(quiz.is_published);
        assert_eq!(quiz.quiz_code.as_deref(), Some("QWERTY"));
        assert_eq!(quiz.time_limit_seconds(), Some(600));
    }

    #[test]
    fn test_fixtures_claims() {
        let claims = claims("teacher-1");
        assert_eq!(claims.sub, "teacher-1");
    }
}
