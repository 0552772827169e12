use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::{
    constants::quiz_prompt::{multiple_choice_prompt, true_false_prompt},
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz::{MultipleChoiceOutput, TrueFalseOutput},
            Quiz, QuizKind,
        },
        dto::{
            request::GenerateQuizRequest,
            response::{QuestionResult, QuizScoreDto},
        },
    },
    services::model_service::{
        QuizGenerator, StructuredPrompt, MULTIPLE_CHOICE_SCHEMA, TRUE_FALSE_SCHEMA,
    },
};

pub struct QuizService {
    generator: Arc<dyn QuizGenerator>,
}

impl QuizService {
    pub fn new(generator: Arc<dyn QuizGenerator>) -> Self {
        Self { generator }
    }

    pub async fn generate_quiz(&self, request: GenerateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let prompt = build_prompt(&request);
        let raw = self.generator.generate(prompt).await.map_err(|e| match e {
            AppError::GenerationFailed(_) => e,
            other => AppError::GenerationFailed(other.to_string()),
        })?;

        let quiz = match request.question_type {
            QuizKind::Mcq => Quiz::Mcq(parse_output::<MultipleChoiceOutput>(raw)?.questions),
            QuizKind::Tf => Quiz::Tf(parse_output::<TrueFalseOutput>(raw)?.questions),
        };

        quiz.check_shape().map_err(|e| {
            log::warn!("Generated quiz failed validation: {}", e);
            AppError::GenerationFailed(e)
        })?;

        if quiz.len() != usize::from(request.num_questions) {
            log::warn!(
                "Requested {} questions, model returned {}",
                request.num_questions,
                quiz.len()
            );
        }

        Ok(quiz)
    }

    /// Compares each answer with the ground truth carried by the quiz.
    /// Unanswered questions score nothing.
    pub fn grade_quiz(quiz: &Quiz, answers: &[Option<String>]) -> AppResult<QuizScoreDto> {
        if answers.len() > quiz.len() {
            return Err(AppError::InvalidInput(format!(
                "Got {} answers for {} questions",
                answers.len(),
                quiz.len()
            )));
        }

        let results: Vec<QuestionResult> = quiz
            .questions()
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let given = answers
                    .get(index)
                    .cloned()
                    .flatten()
                    .filter(|a| !a.is_empty());
                let correct = given.as_deref().is_some_and(|a| question.is_correct(a));
                QuestionResult {
                    index: index as u32,
                    correct,
                    expected_answer: question.expected_answer(),
                    given_answer: given,
                }
            })
            .collect();

        Ok(QuizScoreDto {
            score: results.iter().filter(|r| r.correct).count() as u32,
            total: results.len() as u32,
            results,
        })
    }
}

fn build_prompt(request: &GenerateQuizRequest) -> StructuredPrompt {
    match request.question_type {
        QuizKind::Mcq => StructuredPrompt {
            name: "multiple_choice_quiz".to_string(),
            instruction: multiple_choice_prompt(
                request.source_type,
                &request.source_text,
                request.num_questions,
            ),
            schema: MULTIPLE_CHOICE_SCHEMA.clone(),
        },
        QuizKind::Tf => StructuredPrompt {
            name: "true_false_quiz".to_string(),
            instruction: true_false_prompt(&request.source_text, request.num_questions),
            schema: TRUE_FALSE_SCHEMA.clone(),
        },
    }
}

fn parse_output<T: DeserializeOwned>(raw: Value) -> AppResult<T> {
    serde_json::from_value(raw).map_err(|e| {
        log::warn!("Generated quiz does not match the expected shape: {}", e);
        AppError::GenerationFailed(format!("Output does not match the expected shape: {}", e))
    })
}
