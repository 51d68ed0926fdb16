use async_graphql::http::{GraphiQLSource, parse_query_string};
use async_graphql::parser::parse_query;
use async_graphql::parser::types::{DocumentOperations, OperationType};
use async_graphql::{EmptySubscription, Request, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;

mod context;
mod schema;

use schema::{MutationRoot, QueryRoot};

use crate::store::Store;

pub const GRAPHQL_PATH: &str = "/graphql";

pub type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Store) -> LibrarySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

/// Serves GraphiQL, or runs the request encoded in the query string if there is one.
async fn graphiql_or_query(
    State(schema): State<LibrarySchema>,
    RawQuery(query): RawQuery,
) -> Response {
    let Some(query) = query.filter(|query| !query.is_empty()) else {
        return Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response();
    };

    let req = match parse_query_string(&query) {
        Ok(req) => req,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };
    if !selects_query(&req) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            "Can only perform a mutation operation from a POST request.",
        )
            .into_response();
    }

    GraphQLResponse::from(schema.execute(req).await).into_response()
}

/// Whether the operation `req` would run is a query.
///
/// Documents that fail to parse or do not pick out a single operation are let
/// through, so that execution reports the error.
fn selects_query(req: &Request) -> bool {
    let Ok(doc) = parse_query(&req.query) else {
        return true;
    };
    let ty = match (&doc.operations, req.operation_name.as_deref()) {
        (DocumentOperations::Single(op), _) => Some(op.node.ty),
        (DocumentOperations::Multiple(ops), Some(name)) => ops
            .iter()
            .find(|(op_name, _)| op_name.as_str() == name)
            .map(|(_, op)| op.node.ty),
        (DocumentOperations::Multiple(ops), None) if ops.len() == 1 => {
            ops.values().next().map(|op| op.node.ty)
        }
        (DocumentOperations::Multiple(_), None) => None,
    };
    ty.is_none_or(|ty| matches!(ty, OperationType::Query))
}

#[axum::debug_handler]
async fn graphql_handler(
    State(schema): State<LibrarySchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

pub fn make_app(store: Store) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphiql_or_query).post(graphql_handler))
        .with_state(build_schema(store))
}
