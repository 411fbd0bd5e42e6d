use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

mod cache;
mod config;
mod dataset;
mod llm;

use cache::AnswerCache;
use config::ServerConfig;
use dataset::DatasetStore;
use llm::ChatClient;

struct AppState {
    store: DatasetStore,
    llm: ChatClient,
    cache: AnswerCache,
    dataset_path: PathBuf,
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    #[serde(rename = "docIds", default)]
    doc_ids: Vec<String>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ReloadResponse {
    ok: bool,
    count: usize,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    if config.llm.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; /api/ask will fail until it is provided");
    }

    let dataset_path = PathBuf::from(&config.dataset_path);
    let store = DatasetStore::empty();
    let count = store.reload(&dataset_path).await;
    tracing::info!(count, path = %dataset_path.display(), "loaded dataset");

    let state = Arc::new(AppState {
        store,
        llm: ChatClient::new(&config.llm),
        cache: AnswerCache::new(config.cache.max_entries),
        dataset_path,
    });

    // Allow local testing from any origin (dev). Lock this down in production.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes take precedence; everything else falls through to the
    // static visualization assets.
    let app = Router::new()
        .route("/api/ask", post(ask))
        .route("/__reload_dataset", get(reload_dataset))
        .fallback_service(ServeDir::new(&config.site_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr.as_str())
        .await
        .expect("Failed to bind server address");

    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.unwrap();
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    let question = req.question.trim().to_string();
    if question.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if !state.llm.is_configured() {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    if let Some(answer) = state.cache.get(&question, &req.doc_ids) {
        return Ok(Json(AskResponse { answer }));
    }

    let snapshot = state.store.snapshot().await;
    let context = snapshot.build_context(&req.doc_ids);

    let answer = state.llm.answer(&question, &context).await.map_err(|e| {
        tracing::error!(error = %e, "LLM provider error");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    state.cache.set(&question, &req.doc_ids, answer.clone());

    Ok(Json(AskResponse { answer }))
}

async fn reload_dataset(State(state): State<Arc<AppState>>) -> Json<ReloadResponse> {
    let count = state.store.reload(&state.dataset_path).await;
    state.cache.clear();
    tracing::info!(count, "dataset reloaded");
    Json(ReloadResponse { ok: true, count })
}
