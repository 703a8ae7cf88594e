//! HTTP handlers for import operations

pub mod types;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::services::ImportServiceError;
use types::{
    ExecuteImportRequest, ExecuteImportResponse, JobImportStatusView, QueryRequest, QueryResponse,
    SessionStatusResponse,
};

/// Configure routes for the import API
pub fn configure_routes() -> Router<Arc<types::AppState>> {
    Router::new()
        .route("/imports/query", post(query_remote))
        .route("/imports/jobs", get(list_jobs))
        .route("/imports/execute", post(execute_import))
        .route("/imports/status", get(get_session_status))
        .route("/imports/reset", post(reset_session))
        .route("/imports/openapi.json", get(openapi_spec))
}

/// Serve the OpenAPI document for this API
async fn openapi_spec() -> impl IntoResponse {
    Json(ImportApiDoc::openapi())
}

/// Query the remote server and rebuild the discovered forest
#[utoipa::path(
    post,
    path = "/imports/query",
    tag = "Imports",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Discovered forest (empty with a query_status message on discovery failure)", body = QueryResponse),
        (status = 400, description = "Invalid remote url"),
    )
)]
async fn query_remote(
    State(state): State<Arc<types::AppState>>,
    Json(request): Json<QueryRequest>,
) -> Result<impl IntoResponse, ImportServiceError> {
    let outcome = state
        .orchestrator
        .query(&request.remote_url, request.username, request.password)
        .await?;

    Ok(Json(QueryResponse {
        jobs: outcome.jobs,
        query_status: outcome.query_status,
    }))
}

/// List the currently discovered forest
#[utoipa::path(
    get,
    path = "/imports/jobs",
    tag = "Imports",
    responses(
        (status = 200, description = "Current forest", body = QueryResponse),
    )
)]
async fn list_jobs(
    State(state): State<Arc<types::AppState>>,
) -> Result<impl IntoResponse, ImportServiceError> {
    let jobs = state.orchestrator.jobs().await;
    let query_status = state.orchestrator.query_status().await;
    Ok(Json(QueryResponse { jobs, query_status }))
}

/// Run an import pass over the selected jobs
#[utoipa::path(
    post,
    path = "/imports/execute",
    tag = "Imports",
    request_body = ExecuteImportRequest,
    responses(
        (status = 200, description = "Ledger snapshot after the pass", body = ExecuteImportResponse),
    )
)]
async fn execute_import(
    State(state): State<Arc<types::AppState>>,
    Json(request): Json<ExecuteImportRequest>,
) -> Result<impl IntoResponse, ImportServiceError> {
    let statuses = state.orchestrator.import(&request.job_urls).await;
    Ok(Json(ExecuteImportResponse {
        statuses: statuses.iter().map(JobImportStatusView::from).collect(),
    }))
}

/// Get the current session state
#[utoipa::path(
    get,
    path = "/imports/status",
    tag = "Imports",
    responses(
        (status = 200, description = "Session state", body = SessionStatusResponse),
    )
)]
async fn get_session_status(
    State(state): State<Arc<types::AppState>>,
) -> Result<impl IntoResponse, ImportServiceError> {
    let statuses = state.orchestrator.statuses().await;
    Ok(Json(SessionStatusResponse {
        remote_url: state.orchestrator.remote_url().await,
        query_status: state.orchestrator.query_status().await,
        jobs_available: !state.orchestrator.jobs().await.is_empty(),
        statuses: statuses.iter().map(JobImportStatusView::from).collect(),
    }))
}

/// Discard all session state
#[utoipa::path(
    post,
    path = "/imports/reset",
    tag = "Imports",
    responses(
        (status = 204, description = "Session cleared"),
    )
)]
async fn reset_session(State(state): State<Arc<types::AppState>>) -> impl IntoResponse {
    state.orchestrator.reset().await;
    StatusCode::NO_CONTENT
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        query_remote,
        list_jobs,
        execute_import,
        get_session_status,
        reset_session,
    ),
    components(schemas(
        types::QueryRequest,
        types::QueryResponse,
        types::ExecuteImportRequest,
        types::ExecuteImportResponse,
        types::JobImportStatusView,
        types::SessionStatusResponse,
        jobferry_types::RemoteJob,
    )),
    tags(
        (name = "Imports", description = "Discover and import jobs from a remote automation server")
    )
)]
pub struct ImportApiDoc;
