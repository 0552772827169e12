use actix_web::{get, http::header::ContentType, post, web, HttpResponse};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::{auth::AuthenticatedUser, graphql::Schema};

#[post("/graphql")]
async fn graphql(
    schema: web::Data<Schema>,
    request: GraphQLRequest,
    auth: AuthenticatedUser,
) -> GraphQLResponse {
    let request = request.into_inner().data(auth.0);
    schema.execute(request).await.into()
}

#[get("/graphiql")]
async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(graphql).service(graphiql);
}
