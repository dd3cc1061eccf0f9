//! Response types for the rating engine API.
//!
//! This module defines the error response structures, the validation and
//! publish response bodies, and the mapping from [`EngineError`] to HTTP
//! status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::QuoteOption;
use crate::error::{ConfigurationError, EngineError, EvaluationError};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// The conservative quoting decision an evaluation failure maps to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<QuoteOption>,
    /// Validation findings, present on failed publishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub findings: Option<Vec<ValidationFinding>>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            decision: None,
            findings: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
            decision: None,
            findings: None,
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an evaluation failure response carrying the conservative
    /// `NO_QUOTE` decision.
    ///
    /// An unconfigured input is a configuration gap, not a transient fault;
    /// the quote is declined rather than priced with a neutral default.
    pub fn evaluation_failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            decision: Some(QuoteOption::NoQuote),
            findings: None,
        }
    }
}

/// One validation finding in a response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Stable machine-readable code of the violation.
    pub code: String,
    /// The dimension the violation was found in.
    pub dimension: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl From<&ConfigurationError> for ValidationFinding {
    fn from(error: &ConfigurationError) -> Self {
        Self {
            code: error.code().to_string(),
            dimension: error.dimension().to_string(),
            message: error.to_string(),
        }
    }
}

/// Response body for the `/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Whether the draft may be published.
    pub valid: bool,
    /// Violations that block publishing.
    pub errors: Vec<ValidationFinding>,
    /// Findings that do not block publishing.
    pub warnings: Vec<ValidationFinding>,
}

impl ValidationResponse {
    /// Builds the response body from a validation report.
    pub fn from_report(report: &crate::catalog::ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            errors: report.errors.iter().map(Into::into).collect(),
            warnings: report.warnings.iter().map(Into::into).collect(),
        }
    }
}

/// Response body for a successful `/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    /// The insurer the catalog was published for.
    pub insurer_id: String,
    /// The product the catalog was published for.
    pub product_id: String,
    /// The version number assigned to the new catalog.
    pub version: u32,
    /// When the version was published.
    pub published_at: DateTime<Utc>,
    /// Number of dimensions in the published catalog.
    pub dimension_count: usize,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::CatalogNotFound {
                insurer_id,
                product_id,
            } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "CATALOG_NOT_FOUND",
                    format!(
                        "no published catalog for insurer '{}' and product '{}'",
                        insurer_id, product_id
                    ),
                    "Publish a catalog for this insurer and product before evaluating quotes",
                ),
            },
            EngineError::CatalogFileNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Catalog file not found",
                    format!("catalog file not found: {}", path),
                ),
            },
            EngineError::CatalogParseError { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "CATALOG_PARSE_ERROR",
                    "Failed to parse draft catalog",
                    message,
                ),
            },
            EngineError::ValidationFailed { report } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError {
                    code: "VALIDATION_FAILED".to_string(),
                    message: format!(
                        "draft catalog failed validation with {} error(s)",
                        report.errors.len()
                    ),
                    details: None,
                    decision: None,
                    findings: Some(report.errors.iter().map(Into::into).collect()),
                },
            },
            EngineError::Evaluation(evaluation_error) => {
                let code = match &evaluation_error {
                    EvaluationError::NoMatchingTier { .. } => "NO_MATCHING_TIER",
                    EvaluationError::UnknownLabel { .. } => "UNKNOWN_LABEL",
                };
                ApiErrorResponse {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    error: ApiError::evaluation_failure(code, evaluation_error.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DimensionKey, ValidationReport};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        // Optional fields are skipped when None.
        assert!(!json.contains("details"));
        assert!(!json.contains("decision"));
        assert!(!json.contains("findings"));
    }

    #[test]
    fn test_evaluation_failure_carries_no_quote_decision() {
        let error = ApiError::evaluation_failure("UNKNOWN_LABEL", "unknown label");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"decision\":\"NO_QUOTE\""));
    }

    #[test]
    fn test_unknown_label_maps_to_422_with_no_quote() {
        let engine_error = EngineError::Evaluation(EvaluationError::UnknownLabel {
            dimension: DimensionKey::SoilType,
            label: "Basalt".to_string(),
        });
        let response: ApiErrorResponse = engine_error.into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "UNKNOWN_LABEL");
        assert_eq!(response.error.decision, Some(QuoteOption::NoQuote));
    }

    #[test]
    fn test_catalog_not_found_maps_to_404() {
        let engine_error = EngineError::CatalogNotFound {
            insurer_id: "ins_001".to_string(),
            product_id: "car".to_string(),
        };
        let response: ApiErrorResponse = engine_error.into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "CATALOG_NOT_FOUND");
    }

    #[test]
    fn test_validation_failed_carries_findings() {
        let report = ValidationReport {
            errors: vec![ConfigurationError::DuplicateCategoricalLabel {
                dimension: DimensionKey::SoilType,
                label: "Clay".to_string(),
            }],
            warnings: vec![],
        };
        let response: ApiErrorResponse = EngineError::ValidationFailed { report }.into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_FAILED");
        let findings = response.error.findings.unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "DUPLICATE_CATEGORICAL_LABEL");
        assert_eq!(findings[0].dimension, "soil_type");
    }

    #[test]
    fn test_validation_response_from_report() {
        let report = ValidationReport {
            errors: vec![ConfigurationError::MissingOpenEndedTier {
                dimension: DimensionKey::SumInsured,
            }],
            warnings: vec![ConfigurationError::GapInRange {
                dimension: DimensionKey::ProjectDuration,
                gap_from: Decimal::from_str("12").unwrap(),
                gap_to: Decimal::from_str("18").unwrap(),
            }],
        };

        let response = ValidationResponse::from_report(&report);
        assert!(!response.valid);
        assert_eq!(response.errors[0].code, "MISSING_OPEN_ENDED_TIER");
        assert_eq!(response.warnings[0].code, "GAP_IN_RANGE");
        assert!(response.warnings[0].message.contains("12"));
    }
}
