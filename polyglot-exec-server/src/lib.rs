use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use polyglot_exec::{ExecutionRequest, ExecutionResult, ExecutionStatus, Runner};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tokio::{net::TcpListener, sync::Semaphore};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

pub mod tools;

use tools::{Tool, ToolInfo, ToolResponse};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::UnknownTool(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::InvalidArguments(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExecuteRequest {
    pub language: String,
    pub code: String,
    pub input: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub status: ExecutionStatus,
    pub text: String,
}

impl From<ExecutionResult> for ExecuteResponse {
    fn from(result: ExecutionResult) -> Self {
        Self {
            status: result.status,
            text: result.text,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub id: String,
    pub aliases: Vec<String>,
    pub display_name: String,
    pub compiled: bool,
}

#[derive(Clone)]
pub struct AppState {
    runner: Runner,
    permits: Arc<Semaphore>,
}

impl AppState {
    /// Run `f` once a concurrency permit is available.
    async fn limited<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: std::future::Future<Output = T>,
    {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ServerError::ServerError(e.to_string()))?;
        Ok(f.await)
    }
}

pub fn create_app(runner: Runner, max_concurrent_executions: usize) -> Router {
    let state = AppState {
        runner,
        permits: Arc::new(Semaphore::new(max_concurrent_executions.max(1))),
    };

    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(health_check))
        .route("/languages", get(languages))
        .route("/execute", post(execute))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting polyglot execution server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn languages(State(state): State<AppState>) -> Json<Vec<LanguageInfo>> {
    let languages = state
        .runner
        .registry()
        .specs()
        .iter()
        .map(|spec| LanguageInfo {
            id: spec.id.to_string(),
            aliases: spec.aliases.iter().map(|a| a.to_string()).collect(),
            display_name: spec.display_name.to_string(),
            compiled: spec.is_compiled(),
        })
        .collect();
    Json(languages)
}

async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> Result<Json<ExecuteResponse>, ServerError> {
    let mut request = ExecutionRequest::new(payload.language, payload.code);
    request.stdin = payload.input;

    let result = state.limited(state.runner.run(&request)).await?;
    Ok(Json(result.into()))
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolInfo>> {
    Json(tools::catalogue(state.runner.registry()))
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(args): Json<serde_json::Value>,
) -> Result<Json<ToolResponse>, ServerError> {
    let tool = Tool::resolve(state.runner.registry(), &name)
        .ok_or_else(|| ServerError::UnknownTool(name.clone()))?;
    debug!(tool = %name, "calling tool");

    let response = match tool {
        Tool::Echo => tool.call(&state.runner, args).await?,
        Tool::Execute(_) => state.limited(tool.call(&state.runner, args)).await??,
    };
    Ok(Json(response))
}
