//! Plan backend API types
//!
//! Request and response bodies for the two plan endpoints, and the
//! [`PlanApi`] trait the chat controller talks to.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::plan::Plan;

/// Endpoint path for plan creation
pub const CREATE_PLAN_PATH: &str = "/v1/create_plan";
/// Endpoint path for plan retrieval
pub const GET_PLAN_PATH: &str = "/v1/get_plan";

/// Body of `POST /v1/create_plan`
///
/// Only `goal` is required; unset options are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub goal: String,
    /// Model the backend should plan with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// OpenAI key forwarded to the backend for this request only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    /// Ask the backend for its canned sample plan
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fake: bool,
}

impl CreatePlanRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            ..Self::default()
        }
    }
}

/// Body of `POST /v1/get_plan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPlanRequest {
    pub id: String,
}

/// Response body of both plan endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: Plan,
}

/// Access to the plan backend
///
/// Implementations send exactly one request per call and hand back the
/// `plan` field of the response. Errors are returned as produced by the
/// transport, without retry.
#[async_trait]
pub trait PlanApi: Send + Sync {
    /// Error produced by this backend
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a new plan for a goal
    async fn create_plan(&self, request: &CreatePlanRequest) -> Result<Plan, Self::Error>;

    /// Fetch a previously created plan by id
    async fn get_plan(&self, id: &str) -> Result<Plan, Self::Error>;
}
