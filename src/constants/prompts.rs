use crate::models::{
    domain::LessonPlan,
    dto::request::{GenerateLessonPlanRequest, GenerateMaterialRequest, GenerateQuizRequest},
};

pub const LESSON_PLAN_SYSTEM_PROMPT: &str = "You are an expert curriculum designer and educator. \
Create comprehensive, engaging lesson plans that are age-appropriate and aligned with educational standards.";

pub const QUIZ_SYSTEM_PROMPT: &str = "You are an expert assessment designer. \
Create engaging, fair, and age-appropriate quiz questions that effectively measure student understanding.";

pub const MATERIAL_SYSTEM_PROMPT: &str = "You are an expert in creating differentiated learning materials. \
Create content that is appropriately scaffolded for the specified difficulty level while maintaining \
engagement and educational value.";

pub const CHAT_ASSISTANT_SYSTEM_PROMPT: &str = "You are a supportive teaching assistant for school teachers. \
Give practical, classroom-ready advice on pedagogy, classroom management, differentiated instruction \
and student engagement. Keep answers concise and concrete.";

/// Starter questions offered before a conversation begins.
pub const CHAT_SUGGESTED_PROMPTS: [&str; 4] = [
    "How can I engage struggling students?",
    "What are effective classroom management strategies?",
    "How do I differentiate instruction?",
    "Tips for teaching critical thinking?",
];

pub const QUIZ_MCQ_COUNT: usize = 5;
pub const QUIZ_DESCRIPTIVE_COUNT: usize = 3;

pub fn lesson_plan_prompt(request: &GenerateLessonPlanRequest) -> String {
    format!(
        "Create a detailed lesson plan for:
- Subject: {subject}
- Grade Level: {grade}
- Topic: {topic}
- Duration: {duration} minutes

The lesson plan should include:
1. Clear learning objectives (3-5 objectives)
2. Materials needed
3. Engaging introduction
4. Main activities with timing (array of activity objects with activity name, time allocation in minutes, and description)
5. Assessment methods
6. Differentiation strategies
7. Closure/wrap-up
8. Optional homework

Make it practical, engaging, and easy to implement.",
        subject = request.subject,
        grade = request.grade_level,
        topic = request.topic,
        duration = request.duration,
    )
}

pub fn quiz_prompt(request: &GenerateQuizRequest, lesson_plan: Option<&str>) -> String {
    let mut prompt = format!(
        "Create a quiz with exactly {mcq} multiple-choice questions and {desc} descriptive questions for:
- Title: {title}
- Subject: {subject}
- Grade Level: {grade}
",
        mcq = QUIZ_MCQ_COUNT,
        desc = QUIZ_DESCRIPTIVE_COUNT,
        title = request.title,
        subject = request.subject,
        grade = request.grade_level,
    );

    if let Some(description) = request.description.as_deref().filter(|d| !d.trim().is_empty()) {
        prompt.push_str(&format!("- Description: {}\n", description));
    }

    if let Some(plan) = lesson_plan {
        prompt.push_str(
            "\nUse the following lesson plan details as context. Align questions with its objectives and topic.\n",
        );
        prompt.push_str(plan);
        prompt.push('\n');
    }

    prompt.push_str(
        "\nEach MCQ should have 4 options with exactly one correct answer. \
Give the correct answer as `correct_option`, the zero-based index of the correct entry in `options`.
Descriptive questions should require thoughtful answers and include a suggested answer.",
    );
    prompt
}

pub fn material_prompt(request: &GenerateMaterialRequest, lesson_plan: Option<&str>) -> String {
    let content_type = request.content_type.as_str();
    let difficulty = request.difficulty_level.as_str();
    let topic = request.topic.as_deref().unwrap_or(&request.title);

    let mut prompt = format!(
        "Create {content_type} material for:
- Title: {title}
- Type: {content_type}
- Difficulty: {difficulty}
- Topic: {topic}
",
        title = request.title,
    );

    if let Some(plan) = lesson_plan {
        prompt.push_str("\nBase the material on this lesson plan:\n");
        prompt.push_str(plan);
        prompt.push('\n');
    }

    prompt.push_str(&format!(
        "
Include:
1. Main content appropriate for the difficulty level
2. Questions or exercises (3-5)
3. Clear instructions
4. Suggested duration in minutes

Make it engaging and suitable for {difficulty} learners."
    ));
    prompt
}

/// Serialized lesson plan attached to quiz and material prompts.
pub fn lesson_plan_context(plan: &LessonPlan) -> String {
    serde_json::json!({
        "title": plan.title,
        "subject": plan.subject,
        "grade_level": plan.grade_level,
        "topic": plan.topic,
        "objectives": plan.objectives,
        "main_activities": plan.main_activities,
        "assessment": plan.assessment,
    })
    .to_string()
}
