use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    graphql::helpers::session_identity,
    models::{
        domain::{AllowListEntry, Quiz},
        dto::{
            request::{GenerateQuizRequest, GradeQuizInput},
            response::{MessageResponse, QuizDto, QuizScoreDto},
        },
    },
    services::quiz_service::QuizService,
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_authorized_user(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> Result<AllowListEntry> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        state
            .access_service
            .add_user(&email, &identity)
            .await
            .map_err(|e| e.extend())
    }

    async fn remove_authorized_user(
        &self,
        ctx: &Context<'_>,
        email: String,
    ) -> Result<MessageResponse> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        state
            .access_service
            .remove_user(&email, &identity)
            .await
            .map_err(|e| e.extend())?;

        Ok(MessageResponse::new(format!("'{}' no longer has access", email)))
    }

    async fn set_allow_all(&self, ctx: &Context<'_>, allow_all: bool) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        state
            .access_service
            .set_allow_all(allow_all, &identity)
            .await
            .map_err(|e| e.extend())
    }

    async fn generate_quiz(
        &self,
        ctx: &Context<'_>,
        input: GenerateQuizRequest,
    ) -> Result<QuizDto> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        log::info!("Generating quiz for '{}'", identity);
        let quiz = state
            .quiz_service
            .generate_quiz(input)
            .await
            .map_err(|e| e.extend())?;

        Ok(quiz.into())
    }

    async fn grade_quiz(&self, ctx: &Context<'_>, input: GradeQuizInput) -> Result<QuizScoreDto> {
        session_identity(ctx).map_err(|e| e.extend())?;

        let quiz: Quiz = input.quiz.into();
        QuizService::grade_quiz(&quiz, &input.answers).map_err(|e| e.extend())
    }
}
