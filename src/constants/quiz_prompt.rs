use crate::models::dto::request::SourceType;

pub const QUIZ_SYSTEM_PROMPT: &str = "You are a quiz generator. \
    Respond only with JSON that matches the provided schema. \
    Do not add commentary, markdown or extra keys.";

const MULTIPLE_CHOICE_PREAMBLE: &str =
    "You are an expert educator designing multiple-choice questions to test student knowledge.";

const MULTIPLE_CHOICE_CLOSING: &str = "Make sure that the questions are relevant \
    to the study guide. \
    Use the correct technical terminology. \
    Every correctAnswer must be copied exactly from its question's options.";

const TRUE_FALSE_PREAMBLE: &str = "You are an expert educator creating a true/false quiz.";

pub fn multiple_choice_prompt(
    source_type: SourceType,
    source_text: &str,
    question_count: u8,
) -> String {
    let source = match source_type {
        SourceType::Topic => format!("Topic: {}", source_text.trim()),
        SourceType::StudyGuide => format!("Study Guide:\n{}", source_text.trim()),
    };

    format!(
        "{MULTIPLE_CHOICE_PREAMBLE}\n\n\
         Generate {question_count} multiple-choice questions \
         based on the following topic or study guide. \
         Each question should have 4 possible answers, with one correct answer. \
         The possible answers should be diverse and not obviously wrong. \
         Return the questions in JSON format.\n\n\
         {source}\n\n\
         {MULTIPLE_CHOICE_CLOSING}"
    )
}

pub fn true_false_prompt(source_text: &str, question_count: u8) -> String {
    format!(
        "{TRUE_FALSE_PREAMBLE}\n\n\
         Generate true/false questions based on the following text or topic. \
         Each question is a statement; set isTrue to whether the statement is true.\n\n\
         Text/Topic: {}\n\n\
         Number of Questions: {question_count}",
        source_text.trim()
    )
}
