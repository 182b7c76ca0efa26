

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::{AnalysisError, Analyzer, ErrorKind};
use crate::core::config::ScamScoreConfig;
use crate::core::error::Result;


pub struct AppState {
    pub analyzer: Analyzer,
}


/// `name` stays untyped so a non-string value is reported as invalid input, not a 422.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub name: Option<serde_json::Value>,
}


#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                kind = %self.kind(),
                detail = self.detail().unwrap_or_default(),
                "Error in check API: {}",
                self
            );
        } else {
            warn!(kind = %self.kind(), "Check rejected: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}


pub async fn api_check(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    let name = match payload {
        Ok(Json(CheckRequest {
            name: Some(serde_json::Value::String(name)),
        })) => name,
        Ok(_) => return AnalysisError::InvalidInput.into_response(),
        Err(rejection) => {
            warn!("Malformed check request: {}", rejection.body_text());
            return AnalysisError::InvalidInput.into_response();
        }
    };

    match state.analyzer.analyze(&name).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => e.into_response(),
    }
}


pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/api/check", post(api_check))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %Uuid::new_v4(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}


pub async fn run_server(config: ScamScoreConfig) -> Result<()> {
    let analyzer = Analyzer::from_config(&config)?;
    let state = Arc::new(AppState { analyzer });
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("scamscore API listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
