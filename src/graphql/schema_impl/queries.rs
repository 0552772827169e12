use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::session_identity,
    models::{domain::AllowListEntry, dto::response::AccessStatusDto},
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The signed-in identity and how the access policy treats it.
    async fn me(&self, ctx: &Context<'_>) -> Result<AccessStatusDto> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        Ok(state.access_service.access_status(&identity).await)
    }

    async fn authorized_users(&self, ctx: &Context<'_>) -> Result<Vec<AllowListEntry>> {
        let state = ctx.data::<AppState>()?;
        let identity = session_identity(ctx).map_err(|e| e.extend())?;

        if !state.access_service.is_admin(&identity) {
            return Err(AppError::Unauthorized(
                "Only the admin can view the allow-list".to_string(),
            )
            .extend());
        }

        state
            .access_service
            .list_entries()
            .await
            .map_err(|e| e.extend())
    }

    async fn allow_all(&self, ctx: &Context<'_>) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        session_identity(ctx).map_err(|e| e.extend())?;

        state
            .access_service
            .get_allow_all()
            .await
            .map_err(|e| e.extend())
    }
}
