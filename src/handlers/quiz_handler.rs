use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{GenerateQuizRequest, GradeQuizRequest},
    services::quiz_service::QuizService,
};

#[post("/api/quizzes/generate")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    log::info!("Generating quiz for '{}'", auth.identity());
    let quiz = state.quiz_service.generate_quiz(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/quizzes/grade")]
async fn grade_quiz(
    request: web::Json<GradeQuizRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let score = QuizService::grade_quiz(&request.quiz, &request.answers)?;
    Ok(HttpResponse::Ok().json(score))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_quiz).service(grade_quiz);
}
