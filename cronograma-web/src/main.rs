//! Servidor web Axum com WebSocket para extração de cronogramas em tempo real

mod config;

use std::sync::{mpsc, Arc};
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use cronograma_core::{
    corpus::demo_texts, extract, extract_batch, extract_streaming, CronogramaResult,
    EditalExtractor, EditalSummary, PipelineEvent, Whitelists,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

/// Estado compartilhado da aplicação
struct AppState {
    extractor: EditalExtractor,
    stream_delay: Duration,
}

type SharedState = Arc<AppState>;
type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Deserialize)]
struct ExtractRequest {
    text: String,
}

#[derive(Deserialize)]
struct BatchRequest {
    texts: Vec<String>,
}

#[derive(Serialize)]
struct DemoText {
    title: &'static str,
    text: &'static str,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let whitelists = match &config.whitelist_dir {
        Some(dir) => Whitelists::load_dir(dir)?,
        None => Whitelists::default(),
    };

    let state = Arc::new(AppState {
        extractor: EditalExtractor::new(whitelists),
        stream_delay: config.stream_delay,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Servidor de cronogramas iniciado em http://{}", config.bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/extract", post(extract_handler))
        .route("/extract/batch", post(extract_batch_handler))
        .route("/summarize", post(summarize_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Executa trabalho síncrono de CPU fora do runtime assíncrono.
async fn blocking<T, F>(work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map(Json)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("extração falhou: {e}")))
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Extração das datas-chave; texto vazio resulta em todos os campos nulos.
async fn extract_handler(Json(req): Json<ExtractRequest>) -> ApiResult<CronogramaResult> {
    blocking(move || extract(&req.text)).await
}

/// Extração em lote, preservando a ordem dos textos.
async fn extract_batch_handler(Json(req): Json<BatchRequest>) -> ApiResult<Vec<CronogramaResult>> {
    info!("Extraindo lote de {} editais", req.texts.len());
    blocking(move || {
        let texts: Vec<&str> = req.texts.iter().map(String::as_str).collect();
        extract_batch(&texts)
    })
    .await
}

/// Resumo completo do edital: metadados, vagas, valores e cronograma.
async fn summarize_handler(
    State(state): State<SharedState>,
    Json(req): Json<ExtractRequest>,
) -> ApiResult<EditalSummary> {
    blocking(move || state.extractor.summarize(&req.text)).await
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> Json<Vec<DemoText>> {
    Json(
        demo_texts()
            .into_iter()
            .map(|(title, text)| DemoText { title, text })
            .collect(),
    )
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe um edital, executa o pipeline e envia os eventos
async fn handle_websocket(mut socket: WebSocket, state: SharedState) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(raw) => {
                let text = requested_text(&raw);
                info!("Extraindo via WebSocket: {} chars", text.len());
                let job = tokio::task::spawn_blocking(move || pipeline_events(&text));
                let events = match job.await {
                    Ok(events) => events,
                    Err(e) => {
                        tracing::error!("pipeline interrompido: {e}");
                        return;
                    }
                };

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        tokio::time::sleep(state.stream_delay).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

/// Texto de uma mensagem do WebSocket: JSON `{text}` ou texto puro.
fn requested_text(raw: &str) -> String {
    serde_json::from_str::<ExtractRequest>(raw)
        .map(|req| req.text)
        .unwrap_or_else(|_| raw.to_string())
}

/// Executa o pipeline e coleta todos os eventos; texto vazio gera só `Done`.
fn pipeline_events(text: &str) -> Vec<PipelineEvent> {
    let (tx, rx) = mpsc::channel::<PipelineEvent>();
    extract_streaming(text, tx);
    rx.into_iter().collect()
}
