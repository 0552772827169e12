use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{AddAuthorizedUserRequest, SetAllowAllRequest},
        response::{AccessSettingsDto, MessageResponse},
    },
};

#[get("/api/admin/users")]
async fn list_authorized_users(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    if !state.access_service.is_admin(auth.identity()) {
        return Err(AppError::Unauthorized(
            "Only the admin can view the allow-list".to_string(),
        ));
    }
    let entries = state.access_service.list_entries().await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[post("/api/admin/users")]
async fn add_authorized_user(
    state: web::Data<AppState>,
    request: web::Json<AddAuthorizedUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let entry = state
        .access_service
        .add_user(&request.email, auth.identity())
        .await?;
    Ok(HttpResponse::Created().json(entry))
}

#[delete("/api/admin/users/{email}")]
async fn remove_authorized_user(
    state: web::Data<AppState>,
    email: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .access_service
        .remove_user(&email, auth.identity())
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "'{}' no longer has access",
        email.as_str()
    ))))
}

#[get("/api/admin/settings")]
async fn get_access_settings(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let allow_all = state.access_service.get_allow_all().await?;
    Ok(HttpResponse::Ok().json(AccessSettingsDto { allow_all }))
}

#[put("/api/admin/settings")]
async fn update_access_settings(
    state: web::Data<AppState>,
    request: web::Json<SetAllowAllRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let allow_all = state
        .access_service
        .set_allow_all(request.allow_all, auth.identity())
        .await?;
    Ok(HttpResponse::Ok().json(AccessSettingsDto { allow_all }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_authorized_users)
        .service(add_authorized_user)
        .service(remove_authorized_user)
        .service(get_access_settings)
        .service(update_access_settings);
}
