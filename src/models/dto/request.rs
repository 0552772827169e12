use async_graphql::{Enum, InputObject, OneofObject};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{
    quiz::{MultipleChoiceQuestion, QuizKind, TrueFalseQuestion},
    Quiz,
};

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct AddAuthorizedUserRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SetAllowAllRequest {
    pub allow_all: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Enum)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    #[default]
    Topic,
    StudyGuide,
}

fn default_question_count() -> u8 {
    5
}

fn default_question_type() -> QuizKind {
    QuizKind::Mcq
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[serde(default)]
    #[graphql(default)]
    pub source_type: SourceType,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Provide a topic or study guide between 10 and 5000 characters"
    ))]
    pub source_text: String,

    #[serde(default = "default_question_type")]
    #[graphql(default_with = "default_question_type()")]
    pub question_type: QuizKind,

    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_question_count")]
    #[graphql(default_with = "default_question_count()")]
    pub num_questions: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeQuizRequest {
    pub quiz: Quiz,
    /// Answers by question index; `None` for unanswered questions.
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}

/// Exactly one question list; GraphQL has no tagged unions for input.
#[derive(Debug, Clone, OneofObject)]
pub enum QuizInput {
    MultipleChoice(Vec<MultipleChoiceQuestion>),
    TrueFalse(Vec<TrueFalseQuestion>),
}

impl From<QuizInput> for Quiz {
    fn from(input: QuizInput) -> Self {
        match input {
            QuizInput::MultipleChoice(questions) => Quiz::Mcq(questions),
            QuizInput::TrueFalse(questions) => Quiz::Tf(questions),
        }
    }
}

#[derive(Debug, Clone, InputObject)]
pub struct GradeQuizInput {
    pub quiz: QuizInput,
    #[graphql(default)]
    pub answers: Vec<Option<String>>,
}
