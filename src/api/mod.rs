use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::content::{
    ArticleCategory, ArticleQuery, SubscribeError, SubscriberBook, catalog, query_articles,
};
use crate::core::{
    DEFAULT_BASELINE, EntropySource, GeneratorError, HORIZON_STEPS, RISK_LEVEL_COUNT, RiskLevel,
    SeededSource, SeriesCollection, SeriesPoint, generate_series, profile_for,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Clone)]
struct AppState {
    subscribers: Arc<Mutex<SubscriberBook>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SeriesPayload {
    baseline: Option<f64>,
    seed: Option<u64>,
    risk_level: Option<u8>,
}

#[derive(Debug, Clone, Copy)]
struct SeriesRequest {
    baseline: f64,
    seed: Option<u64>,
    selected: RiskLevel,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SeriesResponse {
    baseline: f64,
    horizon_steps: usize,
    risk_level_count: usize,
    selected_risk_level: RiskLevel,
    seed: Option<u64>,
    peak: f64,
    points: Vec<SeriesPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllocationParams {
    risk_level: Option<u8>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ArticlesParams {
    search: Option<String>,
    category: Option<ArticleCategory>,
    page: Option<u32>,
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SubscribePayload {
    email: String,
}

#[derive(Debug, Serialize)]
struct SubscribeResponse {
    subscribed: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn series_request_from_payload(payload: SeriesPayload) -> Result<SeriesRequest, String> {
    let baseline = payload.baseline.unwrap_or(DEFAULT_BASELINE);
    if !baseline.is_finite() || baseline <= 0.0 {
        return Err("baseline must be a finite positive number".to_string());
    }

    let selected = match payload.risk_level {
        Some(level) => RiskLevel::new(level).map_err(|e| e.to_string())?,
        None => RiskLevel::DEFAULT,
    };

    Ok(SeriesRequest {
        baseline,
        seed: payload.seed,
        selected,
    })
}

#[cfg(test)]
fn series_request_from_json(json: &str) -> Result<SeriesRequest, String> {
    let payload = serde_json::from_str::<SeriesPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    series_request_from_payload(payload)
}

fn build_series_response(request: &SeriesRequest) -> Result<SeriesResponse, GeneratorError> {
    let series = match request.seed {
        Some(seed) => generate_series(request.baseline, &mut SeededSource::from_seed(seed))?,
        None => generate_series(request.baseline, &mut EntropySource::new())?,
    };
    let SeriesCollection { points, peak } = series;

    Ok(SeriesResponse {
        baseline: request.baseline,
        horizon_steps: HORIZON_STEPS,
        risk_level_count: RISK_LEVEL_COUNT,
        selected_risk_level: request.selected,
        seed: request.seed,
        peak,
        points,
    })
}

fn subscribe_error_status(err: SubscribeError) -> StatusCode {
    match err {
        SubscribeError::InvalidEmail => StatusCode::BAD_REQUEST,
        SubscribeError::AlreadySubscribed => StatusCode::CONFLICT,
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let state = AppState {
        subscribers: Arc::new(Mutex::new(SubscriberBook::new())),
    };

    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/series",
            get(series_get_handler).post(series_post_handler),
        )
        .route("/api/allocation", get(allocation_handler))
        .route("/api/articles", get(articles_handler))
        .route("/api/subscribe", post(subscribe_handler))
        .fallback(not_found_handler)
        .with_state(state);

    let listener = TcpListener::bind(addr).await?;
    log::info!("riskline API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn series_get_handler(Query(payload): Query<SeriesPayload>) -> Response {
    series_handler_impl(payload)
}

async fn series_post_handler(Json(payload): Json<SeriesPayload>) -> Response {
    series_handler_impl(payload)
}

fn series_handler_impl(payload: SeriesPayload) -> Response {
    let request = match series_request_from_payload(payload) {
        Ok(request) => request,
        Err(msg) => {
            log::debug!("rejected series request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match build_series_response(&request) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => {
            log::error!("series generation failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "series generation failed")
        }
    }
}

async fn allocation_handler(Query(params): Query<AllocationParams>) -> Response {
    let Some(level) = params.risk_level else {
        return error_response(StatusCode::BAD_REQUEST, "riskLevel query parameter is required");
    };
    match RiskLevel::new(level) {
        Ok(level) => json_response(StatusCode::OK, profile_for(level)),
        Err(err) => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    }
}

async fn articles_handler(Query(params): Query<ArticlesParams>) -> Response {
    let query = ArticleQuery {
        search: params.search,
        category: params.category,
        page: params.page,
        page_size: params.page_size,
    };
    json_response(StatusCode::OK, query_articles(catalog(), &query))
}

async fn subscribe_handler(
    State(state): State<AppState>,
    Json(payload): Json<SubscribePayload>,
) -> Response {
    let mut book = state
        .subscribers
        .lock()
        .expect("subscriber registry lock poisoned");
    match book.subscribe(&payload.email) {
        Ok(()) => {
            log::info!("newsletter signup accepted ({} total)", book.len());
            json_response(StatusCode::OK, SubscribeResponse { subscribed: true })
        }
        Err(err) => error_response(subscribe_error_status(err), &err.to_string()),
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
