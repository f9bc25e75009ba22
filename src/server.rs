//! HTTP surface: one generation endpoint, a health probe, and static serving
//! of rendered media. All pipeline failures are typed; this layer only maps
//! them to status codes and a `{"error": ...}` body.

use crate::codegen::repair::{repair, RepairError};
use crate::codegen::scene::{extract_scene_name, SceneError};
use crate::codegen::validate::{validate, ValidateError};
use crate::codegen::clean::clean;
use crate::config::Config;
use crate::llm::client::LlmClient;
use crate::llm::{prompts, CodeGenerator, LlmError};
use crate::render::{render, RenderError};
use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

/// Shared immutable state; each request gets the same client and config.
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
}

#[derive(Deserialize)]
struct GenerateRequest {
    prompt: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    #[serde(rename = "videoUrl")]
    video_url: String,
    code: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Everything that can go wrong between a prompt and a video URL.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("prompt must not be empty")]
    EmptyPrompt,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Repair(#[from] RepairError),

    #[error(transparent)]
    Validate(#[from] ValidateError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PipelineError {
    /// Status mapping: 400 for anything wrong with the generated code or the
    /// request, 408 for a render that ran out of wall clock, 502 when the
    /// upstream LLM rejected or dropped the call, 500 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EmptyPrompt
            | Self::Repair(_)
            | Self::Validate(_)
            | Self::Scene(_)
            | Self::Render(RenderError::Failed { .. }) => StatusCode::BAD_REQUEST,
            Self::Render(RenderError::Timeout(_)) => StatusCode::REQUEST_TIMEOUT,
            Self::Llm(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Run the whole pipeline for one prompt: generate, clean, repair, validate,
/// extract the scene name, render. Strictly sequential and request-scoped.
async fn run_pipeline(
    state: &AppState,
    prompt: &str,
) -> Result<GenerateResponse, PipelineError> {
    if prompt.is_empty() {
        return Err(PipelineError::EmptyPrompt);
    }

    log::info!("generating scene code ({} char prompt)", prompt.len());
    let raw = state.llm.generate(prompts::MANIM_SYSTEM, prompt).await?;
    let code = clean(&raw);
    let code = repair(&code, &state.llm).await?;
    validate(&code)?;
    let scene_name = extract_scene_name(&code)?;

    let video = render(&code, &scene_name, &state.config.render).await?;
    log::info!("rendered {scene_name} to {}", video.video_path.display());

    Ok(GenerateResponse {
        video_url: video.url_path,
        code,
    })
}

async fn generate_video(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    match run_pipeline(&state, request.prompt.trim()).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => {
            log::error!("generate-video failed: {err}");
            (
                err.status_code(),
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate-video", post(generate_video))
        .route("/health", get(health))
        .nest_service("/media", ServeDir::new(&state.config.render.media_dir))
        .layer(cors)
        .with_state(state)
}

pub async fn run(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
