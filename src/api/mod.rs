//! HTTP API module for the rating engine.
//!
//! This module provides the REST endpoints for validating and publishing
//! rating catalogs and for evaluating quotes against the current version.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::EvaluateRequest;
pub use response::{ApiError, PublishResponse, ValidationFinding, ValidationResponse};
pub use state::AppState;
