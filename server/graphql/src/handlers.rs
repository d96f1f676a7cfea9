use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use async_graphql_axum::GraphQLResponse;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use slog::debug;
use uuid::Uuid;

use crate::schema::scoped_request;
use crate::server::AppState;

pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/").finish())
}

pub async fn graphql_request(
    State(state): State<AppState>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let AppState {
        schema,
        loader_factory,
        call_client,
        logger,
    } = state;

    let logger = logger.new(slog::o!("request_id" => Uuid::new_v4().to_string()));
    let request = scoped_request(request.into_inner(), &loader_factory, &call_client, &logger);

    let response = schema.execute(request).await;

    debug!(
        logger,
        "Executed GraphQL request";
        "errors" => response.errors.len()
    );

    response.into()
}
