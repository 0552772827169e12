use async_graphql::{Enum, InputObject, SimpleObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const MCQ_OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    Mcq,
    Tf,
}

#[derive(
    Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject, InputObject, JsonSchema,
)]
#[graphql(input_name = "MultipleChoiceQuestionInput")]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MultipleChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl MultipleChoiceQuestion {
    /// Four non-empty options, one of which is exactly the correct answer.
    pub fn check_shape(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        if self.options.len() != MCQ_OPTION_COUNT {
            return Err(format!(
                "expected {} options, got {}",
                MCQ_OPTION_COUNT,
                self.options.len()
            ));
        }
        if self.options.iter().any(|o| o.trim().is_empty()) {
            return Err("an option is empty".to_string());
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(format!(
                "correct answer '{}' is not one of the options",
                self.correct_answer
            ));
        }
        Ok(())
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject, InputObject, JsonSchema,
)]
#[graphql(input_name = "TrueFalseQuestionInput")]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrueFalseQuestion {
    pub question: String,
    pub is_true: bool,
}

impl TrueFalseQuestion {
    pub fn check_shape(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("question text is empty".to_string());
        }
        Ok(())
    }

    /// Answers are the literal strings "true" or "false".
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.expected_answer()
    }

    pub fn expected_answer(&self) -> &'static str {
        if self.is_true {
            "true"
        } else {
            "false"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizQuestion<'a> {
    MultipleChoice(&'a MultipleChoiceQuestion),
    TrueFalse(&'a TrueFalseQuestion),
}

impl QuizQuestion<'_> {
    pub fn is_correct(&self, answer: &str) -> bool {
        match self {
            QuizQuestion::MultipleChoice(q) => q.is_correct(answer),
            QuizQuestion::TrueFalse(q) => q.is_correct(answer),
        }
    }

    pub fn expected_answer(&self) -> String {
        match self {
            QuizQuestion::MultipleChoice(q) => q.correct_answer.clone(),
            QuizQuestion::TrueFalse(q) => q.expected_answer().to_string(),
        }
    }
}

/// A generated quiz. Every question in a quiz has the same shape.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", content = "questions", rename_all = "lowercase")]
pub enum Quiz {
    Mcq(Vec<MultipleChoiceQuestion>),
    Tf(Vec<TrueFalseQuestion>),
}

impl Quiz {
    pub fn kind(&self) -> QuizKind {
        match self {
            Quiz::Mcq(_) => QuizKind::Mcq,
            Quiz::Tf(_) => QuizKind::Tf,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Quiz::Mcq(questions) => questions.len(),
            Quiz::Tf(questions) => questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn questions(&self) -> Vec<QuizQuestion<'_>> {
        match self {
            Quiz::Mcq(questions) => questions.iter().map(QuizQuestion::MultipleChoice).collect(),
            Quiz::Tf(questions) => questions.iter().map(QuizQuestion::TrueFalse).collect(),
        }
    }

    pub fn check_shape(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("no questions were generated".to_string());
        }
        let results: Vec<Result<(), String>> = match self {
            Quiz::Mcq(questions) => questions.iter().map(|q| q.check_shape()).collect(),
            Quiz::Tf(questions) => questions.iter().map(|q| q.check_shape()).collect(),
        };
        for (index, result) in results.into_iter().enumerate() {
            result.map_err(|e| format!("question {}: {}", index + 1, e))?;
        }
        Ok(())
    }
}

/// Shape the model must produce for multiple-choice quizzes.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct MultipleChoiceOutput {
    pub questions: Vec<MultipleChoiceQuestion>,
}

/// Shape the model must produce for true/false quizzes.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TrueFalseOutput {
    pub questions: Vec<TrueFalseQuestion>,
}
