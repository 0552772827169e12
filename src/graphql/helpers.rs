use async_graphql::Context;

use crate::{
    auth::SessionClaims,
    errors::{AppError, AppResult},
};

/// Identity the session gate verified for this request.
pub fn session_identity(ctx: &Context<'_>) -> AppResult<String> {
    ctx.data::<SessionClaims>()
        .map(|claims| claims.identity().to_string())
        .map_err(|_| AppError::Unauthenticated("Authentication required".to_string()))
}
