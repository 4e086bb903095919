pub mod cli;
pub mod input;

use std::sync::Arc;

use axum::{
    Router,
    extract::{
        Json, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::{DisplayFormat, SimulationInput, SimulationResult, simulate, simulate_from};
use crate::error::Result;
use input::{SimulatePayload, SimulateRequest};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    start_date: NaiveDate,
    end_date: NaiveDate,
    end_date_label: String,
    labels: Vec<String>,
    series: Vec<f64>,
    final_balance: f64,
    final_balance_text: String,
    total_deposits: f64,
    total_growth: f64,
    deposit_count: u32,
    compound_count: u32,
    summary: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(format: Arc<DisplayFormat>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(format)
}

pub async fn run_http_server(config: &AppConfig) -> Result<()> {
    let addr = config.socket_addr();
    let app = router(Arc::new(config.format.clone()));

    let listener = TcpListener::bind(addr).await?;
    info!("growth projector listening on http://{addr}");
    info!("local access: http://127.0.0.1:{}/", config.port);

    axum::serve(listener, app).await?;
    Ok(())
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

async fn simulate_get_handler(
    State(format): State<Arc<DisplayFormat>>,
    payload: std::result::Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => simulate_handler_impl(&format, payload),
        Err(rejection) => error_response(rejection.status(), &rejection.body_text()),
    }
}

async fn simulate_post_handler(
    State(format): State<Arc<DisplayFormat>>,
    payload: std::result::Result<Json<SimulatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => simulate_handler_impl(&format, payload),
        Err(rejection) => error_response(rejection.status(), &rejection.body_text()),
    }
}

fn simulate_handler_impl(format: &DisplayFormat, payload: SimulatePayload) -> Response {
    let SimulateRequest { input, start_date } = match payload.into_request() {
        Ok(request) => request,
        Err(err) => {
            warn!(%err, "rejected simulate request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let result = match start_date {
        Some(start) => simulate_from(start, &input, format),
        None => simulate(&input, format),
    };
    json_response(
        StatusCode::OK,
        build_simulate_response(&input, result, format),
    )
}

fn build_simulate_response(
    input: &SimulationInput,
    result: SimulationResult,
    format: &DisplayFormat,
) -> SimulateResponse {
    let summary = format.summary(input, &result);
    let total_growth = result.total_growth(input);
    SimulateResponse {
        start_date: result.start_date,
        end_date: result.end_date,
        end_date_label: format.date_label(result.end_date),
        final_balance_text: format.currency(result.final_balance),
        final_balance: result.final_balance,
        total_deposits: result.total_deposits,
        total_growth,
        deposit_count: result.deposit_count,
        compound_count: result.compound_count,
        summary,
        labels: result.labels,
        series: result.series,
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
