use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::{Extension, Json, Router, routing::get, routing::post};
use tracing::Instrument;

use crate::auth;
use crate::error::{AppError, attach_request_id};
use crate::models::{RedeemRequest, RedeemResponse, TokenResponse, TokenizeRequest};
use crate::state::AppState;
use crate::telemetry::{RequestId, request_id_layer, request_span};

pub fn router(state: AppState) -> Router {
    let api = api_routes().layer(middleware::from_fn_with_state(
        state.clone(),
        auth::http_layer,
    ));

    Router::new()
        .route("/healthz", get(health_check))
        .merge(api)
        .layer(middleware::from_fn(request_id_layer))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/token", post(create_token))
        .route("/v1/redeem", post(redeem_token))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn create_token(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<TokenizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let span = request_span("vault.create", &request_id.0);
    let id = request_id.clone();
    async move {
        require_authority(&state, &request.authority)?;
        let token = state
            .vault
            .create_token(&request.sde)
            .map_err(AppError::from)?;
        let response = TokenResponse {
            sde: request.sde,
            token,
            authority: request.authority,
            request_id: id.0,
        };
        Ok((StatusCode::OK, Json(response)))
    }
    .instrument(span)
    .await
    .map_err(|err: AppError| attach_request_id(err, &request_id))
}

async fn redeem_token(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RedeemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let span = request_span("vault.redeem", &request_id.0);
    let id = request_id.clone();
    async move {
        require_authority(&state, &request.authority)?;
        let sde = state
            .vault
            .redeem_token(&request.token)
            .map_err(AppError::from)?;
        let response = RedeemResponse {
            sde,
            token: request.token,
            authority: request.authority,
            request_id: id.0,
        };
        Ok((StatusCode::OK, Json(response)))
    }
    .instrument(span)
    .await
    .map_err(|err: AppError| attach_request_id(err, &request_id))
}

fn require_authority(state: &AppState, label: &str) -> Result<(), AppError> {
    if state.authorities.is_recognized(label) {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "unrecognized authority `{label}`"
        )))
    }
}
