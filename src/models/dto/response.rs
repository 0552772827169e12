use async_graphql::{Enum, SimpleObject};
use serde::Serialize;

use crate::models::domain::{
    quiz::{MultipleChoiceQuestion, TrueFalseQuestion},
    Quiz, QuizKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Enum)]
#[serde(rename_all = "camelCase")]
pub enum AccessReason {
    Admin,
    AllowAll,
    AllowListed,
    Denied,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AccessStatusDto {
    pub email: String,
    pub is_admin: bool,
    pub authorized: bool,
    pub reason: AccessReason,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct AccessSettingsDto {
    pub allow_all: bool,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// GraphQL view of a generated quiz; exactly one of the lists is populated.
#[derive(Debug, Clone, SimpleObject)]
pub struct QuizDto {
    pub kind: QuizKind,
    pub multiple_choice: Vec<MultipleChoiceQuestion>,
    pub true_false: Vec<TrueFalseQuestion>,
}

impl From<Quiz> for QuizDto {
    fn from(quiz: Quiz) -> Self {
        let kind = quiz.kind();
        match quiz {
            Quiz::Mcq(questions) => QuizDto {
                kind,
                multiple_choice: questions,
                true_false: vec![],
            },
            Quiz::Tf(questions) => QuizDto {
                kind,
                multiple_choice: vec![],
                true_false: questions,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub index: u32,
    pub correct: bool,
    pub expected_answer: String,
    pub given_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoreDto {
    pub score: u32,
    pub total: u32,
    pub results: Vec<QuestionResult>,
}
