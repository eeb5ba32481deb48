use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizDraft},
        dto::request::{DescriptivePatch, McqPatch, QuizEditRequest},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DraftOrigin {
    New,
    Stored(String),
}

/// What saving the editor asks storage to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveQuiz {
    Create(QuizDraft),
    Update { id: String, draft: QuizDraft },
}

/// In-memory editing of a quiz draft. A rejected edit leaves the draft as it
/// was; for `apply` that holds for the whole batch.
#[derive(Debug, Clone)]
pub struct QuizEditor {
    origin: DraftOrigin,
    draft: QuizDraft,
}

impl QuizEditor {
    pub fn new(draft: QuizDraft) -> Self {
        Self {
            origin: DraftOrigin::New,
            draft,
        }
    }

    pub fn open(quiz: &Quiz) -> Self {
        Self {
            origin: DraftOrigin::Stored(quiz.id.clone()),
            draft: quiz.to_draft(),
        }
    }

    pub fn set_title(&mut self, title: &str) -> AppResult<()> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz title cannot be empty".to_string()));
        }
        self.draft.title = title.to_string();
        Ok(())
    }

    /// Zero minutes removes the time limit.
    pub fn set_duration(&mut self, minutes: u32) {
        self.draft.duration = if minutes == 0 { None } else { Some(minutes) };
    }

    pub fn set_published(&mut self, published: bool) {
        self.draft.is_published = published;
    }

    pub fn update_mcq(&mut self, index: usize, patch: McqPatch) -> AppResult<()> {
        let count = self.draft.mcq_questions.len();
        let current = self
            .draft
            .mcq_questions
            .get(index)
            .ok_or_else(|| out_of_range("Multiple-choice question", index, count))?;

        let mut updated = current.clone();
        if let Some(question) = patch.question {
            updated.question = question;
        }
        if let Some(options) = patch.options {
            updated.options = options;
        }
        if let Some(correct_option) = patch.correct_option {
            updated.correct_option = correct_option;
        }
        if let Some(points) = patch.points {
            updated.points = points;
        }
        updated.check(index)?;

        self.draft.mcq_questions[index] = updated;
        Ok(())
    }

    pub fn update_mcq_option(&mut self, question: usize, option: usize, text: &str) -> AppResult<()> {
        let count = self.draft.mcq_questions.len();
        let mcq = self
            .draft
            .mcq_questions
            .get_mut(question)
            .ok_or_else(|| out_of_range("Multiple-choice question", question, count))?;

        let option_count = mcq.options.len();
        let slot = mcq
            .options
            .get_mut(option)
            .ok_or_else(|| out_of_range("Option", option, option_count))?;
        *slot = text.to_string();
        Ok(())
    }

    pub fn update_descriptive(&mut self, index: usize, patch: DescriptivePatch) -> AppResult<()> {
        let count = self.draft.descriptive_questions.len();
        let current = self
            .draft
            .descriptive_questions
            .get(index)
            .ok_or_else(|| out_of_range("Descriptive question", index, count))?;

        let mut updated = current.clone();
        if let Some(question) = patch.question {
            updated.question = question;
        }
        if let Some(suggested_answer) = patch.suggested_answer {
            updated.suggested_answer = suggested_answer;
        }
        if let Some(points) = patch.points {
            updated.points = points;
        }
        updated.check(index)?;

        self.draft.descriptive_questions[index] = updated;
        Ok(())
    }

    /// Applies a batch of edits in order: title, duration, questions,
    /// single options, descriptive questions, then the publish toggle.
    /// Any failing edit discards the whole batch.
    pub fn apply(&mut self, request: QuizEditRequest) -> AppResult<()> {
        let mut staged = self.clone();
        if let Some(title) = request.title.as_deref() {
            staged.set_title(title)?;
        }
        if let Some(minutes) = request.duration {
            staged.set_duration(minutes);
        }
        for edit in request.mcq_edits {
            staged.update_mcq(edit.index, edit.patch)?;
        }
        for edit in request.option_edits {
            staged.update_mcq_option(edit.question, edit.option, &edit.text)?;
        }
        for edit in request.descriptive_edits {
            staged.update_descriptive(edit.index, edit.patch)?;
        }
        if let Some(published) = request.publish {
            staged.set_published(published);
        }
        *self = staged;
        Ok(())
    }

    pub fn into_save(self) -> SaveQuiz {
        match self.origin {
            DraftOrigin::New => SaveQuiz::Create(self.draft),
            DraftOrigin::Stored(id) => SaveQuiz::Update {
                id,
                draft: self.draft,
            },
        }
    }
}

fn out_of_range(what: &str, index: usize, count: usize) -> AppError {
    AppError::ValidationError(format!(
        "{} index {} is out of range (have {})",
        what, index, count
    ))
}
