//! HTTP request handlers for the rating engine API.
//!
//! This module contains the handler functions for the `/evaluate`,
//! `/validate`, and `/publish` endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::DraftCatalog;
use crate::error::EngineError;
use crate::evaluation::evaluate_quote;
use crate::models::QuoteEvaluation;

use super::request::EvaluateRequest;
use super::response::{ApiError, ApiErrorResponse, PublishResponse, ValidationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/validate", post(validate_handler))
        .route("/publish", post(publish_handler))
        .with_state(state)
}

/// Maps a JSON extraction failure to a 400 error body.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for the POST /evaluate endpoint.
///
/// Resolves the current catalog version for the requested insurer/product
/// and evaluates the supplied quote context against it.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let Some(published) = state.store().current(&request.insurer_id, &request.product_id)
    else {
        warn!(
            correlation_id = %correlation_id,
            insurer_id = %request.insurer_id,
            product_id = %request.product_id,
            "No published catalog"
        );
        let api_error: ApiErrorResponse = EngineError::CatalogNotFound {
            insurer_id: request.insurer_id,
            product_id: request.product_id,
        }
        .into();
        return api_error.into_response();
    };

    let start_time = Instant::now();
    match evaluate_quote(&published, &request.context) {
        Ok(adjustment) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                catalog_version = published.version(),
                final_premium = %adjustment.final_premium,
                decision = ?adjustment.decision,
                duration_us = duration.as_micros(),
                "Evaluation completed successfully"
            );
            let evaluation = QuoteEvaluation {
                evaluation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                insurer_id: request.insurer_id,
                product_id: request.product_id,
                catalog_version: published.version(),
                base_premium: request.context.base_premium,
                adjustment,
                duration_us: duration.as_micros() as u64,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(evaluation),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Evaluation failed"
            );
            let api_error: ApiErrorResponse = EngineError::from(err).into();
            api_error.into_response()
        }
    }
}

/// Handler for the POST /validate endpoint.
///
/// Checks a draft catalog against the publish invariants and returns every
/// violation found. Findings are data, so a draft with errors still gets a
/// 200 response.
async fn validate_handler(
    payload: Result<Json<DraftCatalog>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validation request");

    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let catalog = match draft.into_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Draft conversion failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    let report = crate::catalog::validate(&catalog);
    info!(
        correlation_id = %correlation_id,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validation completed"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ValidationResponse::from_report(&report)),
    )
        .into_response()
}

/// Handler for the POST /publish endpoint.
///
/// Validates a draft catalog and, on success, publishes it as the new
/// current version. On failure the previous version remains live.
async fn publish_handler(
    State(state): State<AppState>,
    payload: Result<Json<DraftCatalog>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing publish request");

    let draft = match payload {
        Ok(Json(draft)) => draft,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let catalog = match draft.into_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Draft conversion failed"
            );
            let api_error: ApiErrorResponse = err.into();
            return api_error.into_response();
        }
    };

    match state.store().publish(catalog) {
        Ok(published) => {
            info!(
                correlation_id = %correlation_id,
                insurer_id = %published.catalog().insurer_id,
                product_id = %published.catalog().product_id,
                version = published.version(),
                "Catalog published"
            );
            let response = PublishResponse {
                insurer_id: published.catalog().insurer_id.clone(),
                product_id: published.catalog().product_id.clone(),
                version: published.version(),
                published_at: published.published_at(),
                dimension_count: published.catalog().dimensions.len(),
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(response),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Publish rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}
