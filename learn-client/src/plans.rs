//! Plan API operations

use async_trait::async_trait;
use learn_core::api::{CREATE_PLAN_PATH, GET_PLAN_PATH};
use learn_core::{ApiConfig, CreatePlanRequest, GetPlanRequest, Plan, PlanApi, PlanResponse};
use tracing::{debug, info};

use crate::{Error, HttpClient, Result};

/// Client for the plan endpoints
#[derive(Debug, Clone)]
pub struct PlanClient {
    http: HttpClient,
}

impl PlanClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build a client from the `[api]` configuration section
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(HttpClient::from_config(config)?))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Generate a plan for the request's goal
    pub async fn create_plan(&self, request: &CreatePlanRequest) -> Result<Plan> {
        debug!(goal = %request.goal, model = ?request.model, fake = request.fake, "Creating plan");
        let response: PlanResponse = self.http.post_json(CREATE_PLAN_PATH, request).await?;
        info!(id = ?response.plan.id, subject = %response.plan.subject.subject, "Plan created");
        Ok(response.plan)
    }

    /// Fetch a plan by id
    pub async fn get_plan(&self, id: &str) -> Result<Plan> {
        debug!(id, "Fetching plan");
        let request = GetPlanRequest { id: id.to_string() };
        let response: PlanResponse = self.http.post_json(GET_PLAN_PATH, &request).await?;
        Ok(response.plan)
    }
}

#[async_trait]
impl PlanApi for PlanClient {
    type Error = Error;

    async fn create_plan(&self, request: &CreatePlanRequest) -> Result<Plan> {
        PlanClient::create_plan(self, request).await
    }

    async fn get_plan(&self, id: &str) -> Result<Plan> {
        PlanClient::get_plan(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::TestServer;
    use learn_core::{ChatSession, Submission};
    use serde_json::json;
    use std::time::Duration;

    const PLAN_RESPONSE: &str = r#"{
        "plan": {
            "id": "42",
            "goal": "x",
            "subject": {
                "subject": "Python",
                "subjects": [{"subject": "Hello world", "exercises": [{"description": "print it"}]}]
            }
        }
    }"#;

    fn client_for(server: &TestServer) -> PlanClient {
        PlanClient::new(HttpClient::new(server.url.clone(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_create_plan_posts_goal() {
        let server = TestServer::start(200, PLAN_RESPONSE).await;
        let client = client_for(&server);

        let plan = client.create_plan(&CreatePlanRequest::new("x")).await.unwrap();
        assert_eq!(plan.id.as_deref(), Some("42"));
        assert_eq!(plan.subject.subject, "Python");
        assert_eq!(plan.subject.subjects[0].exercises[0].description, "print it");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/v1/create_plan");
        assert_eq!(requests[0].json(), json!({"goal": "x"}));
    }

    #[tokio::test]
    async fn test_get_plan_posts_id() {
        let server = TestServer::start(200, PLAN_RESPONSE).await;
        let client = client_for(&server);

        let plan = client.get_plan("42").await.unwrap();
        assert_eq!(plan.goal, "x");

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/v1/get_plan");
        assert_eq!(requests[0].json(), json!({"id": "42"}));
    }

    #[tokio::test]
    async fn test_missing_plan_field_is_decode_error() {
        let server = TestServer::start(200, r#"{"error": null}"#).await;
        let client = client_for(&server);

        let result = client.get_plan("42").await;
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn test_backend_error_propagates_unchanged() {
        let server = TestServer::start(400, r#"{"error": "goal not provided"}"#).await;
        let client = client_for(&server);

        let err = client.create_plan(&CreatePlanRequest::new("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "Backend returned 400 Bad Request: goal not provided");
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_session_over_http() {
        let server = TestServer::start(200, PLAN_RESPONSE).await;
        let mut session = ChatSession::new(client_for(&server));

        assert_eq!(session.send("   ").await, Submission::Ignored);
        assert!(server.requests().is_empty());

        session.send("x").await;
        assert!(session.phase().is_plan_shown());
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_chat_session_failure_shows_fixed_message() {
        let server = TestServer::start(500, r#"{"error": "model overloaded"}"#).await;
        let mut session = ChatSession::new(client_for(&server));

        session.send("x").await;
        assert!(session.phase().is_idle());
        assert!(session.input_enabled());
        assert_eq!(
            session.transcript().last().unwrap().text,
            learn_core::chat::ERROR_MESSAGE
        );
    }
}
