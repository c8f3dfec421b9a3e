//! Chat session: transcript plus phase transitions

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::api::{CreatePlanRequest, PlanApi};
use crate::plan::{Plan, PlanView};

use super::state::ChatPhase;

/// First system message of every session
pub const GREETING: &str = "What do you want to learn?";
/// Sent when a create request starts
pub const WORKING_MESSAGE: &str = "Ok, let me work on that...";
/// Sent when a plan arrives
pub const PLAN_READY_MESSAGE: &str = "Are you happy with the plan or do you want me to change it?";
/// Sent for input received while a plan is shown
pub const FEEDBACK_MESSAGE: &str = "Thank you for your feedback. Let me try again...";
/// The only failure message the user sees
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong. Please try again later.";

/// Author of a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// Result of handing user input to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Nothing happened: blank input, or a request is already in flight
    Ignored,
    /// A plan must be requested; call [`ChatSession::resolve`] with the outcome
    Request(CreatePlanRequest),
    /// Input was taken as feedback on the shown plan
    Feedback,
}

/// A single chat conversation with the plan backend
pub struct ChatSession<A> {
    api: A,
    phase: ChatPhase,
    transcript: Vec<ChatMessage>,
    model: Option<String>,
    openai_api_key: Option<String>,
    fake: bool,
}

impl<A> ChatSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            phase: ChatPhase::Idle,
            transcript: vec![ChatMessage::new(Role::System, GREETING)],
            model: None,
            openai_api_key: None,
            fake: false,
        }
    }

    /// Model to request plans with
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    /// OpenAI key forwarded with create requests
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.openai_api_key = key;
        self
    }

    /// Request the backend's sample plan instead of generating one
    pub fn with_fake(mut self, fake: bool) -> Self {
        self.fake = fake;
        self
    }

    /// Backend this session sends requests to
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn phase(&self) -> &ChatPhase {
        &self.phase
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Whether new input is accepted (false while a request is in flight)
    pub fn input_enabled(&self) -> bool {
        !self.phase.is_awaiting()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.phase.plan()
    }

    /// The displayed plan together with its mutable view state
    pub fn plan_and_view_mut(&mut self) -> Option<(&Plan, &mut PlanView)> {
        match &mut self.phase {
            ChatPhase::PlanShown { plan, view } => Some((&**plan, view)),
            _ => None,
        }
    }

    /// Apply user input to the state machine
    ///
    /// Does not talk to the backend. When [`Submission::Request`] is returned
    /// the caller performs the request and reports back through
    /// [`resolve`](Self::resolve).
    pub fn submit(&mut self, input: &str) -> Submission {
        let input = input.trim();
        if input.is_empty() {
            debug!("Ignoring blank input");
            return Submission::Ignored;
        }

        if self.phase.is_awaiting() {
            debug!("Ignoring input while a request is in flight");
            return Submission::Ignored;
        }

        if self.phase.is_plan_shown() {
            // Feedback is acknowledged only; the plan is not regenerated.
            self.push(Role::User, input);
            self.push(Role::System, FEEDBACK_MESSAGE);
            return Submission::Feedback;
        }

        self.push(Role::User, input);
        self.push(Role::System, WORKING_MESSAGE);
        self.transition(ChatPhase::AwaitingResponse {
            goal: input.to_string(),
        });
        Submission::Request(CreatePlanRequest {
            goal: input.to_string(),
            model: self.model.clone(),
            openai_api_key: self.openai_api_key.clone(),
            fake: self.fake,
        })
    }

    /// Report the outcome of the request returned by [`submit`](Self::submit)
    ///
    /// Outcomes arriving when no request is in flight are dropped.
    pub fn resolve<E: Display>(&mut self, result: Result<Plan, E>) {
        if !self.phase.is_awaiting() {
            debug!(phase = self.phase.name(), "Dropping plan outcome with no request in flight");
            return;
        }

        match result {
            Ok(plan) => {
                info!(
                    subjects = plan.subject.node_count(),
                    depth = plan.subject.depth(),
                    "Plan received"
                );
                let view = PlanView::new(&plan.subject);
                self.transition(ChatPhase::PlanShown {
                    plan: Box::new(plan),
                    view,
                });
                self.push(Role::System, PLAN_READY_MESSAGE);
            }
            Err(e) => {
                error!(error = %e, "Error in creating plan");
                self.transition(ChatPhase::Idle);
                self.push(Role::System, ERROR_MESSAGE);
            }
        }
    }

    /// Drop any plan and return to [`ChatPhase::Idle`]
    pub fn clear(&mut self) {
        self.transition(ChatPhase::Idle);
    }

    fn push(&mut self, role: Role, text: &str) {
        self.transcript.push(ChatMessage::new(role, text));
    }

    fn transition(&mut self, next: ChatPhase) {
        info!(from = self.phase.name(), to = next.name(), "Chat phase transition");
        self.phase = next;
    }
}

impl<A: PlanApi> ChatSession<A> {
    /// Submit input and, when it starts a request, wait for the plan
    pub async fn send(&mut self, input: &str) -> Submission {
        let submission = self.submit(input);
        if let Submission::Request(request) = &submission {
            let result = self.api.create_plan(request).await;
            self.resolve(result);
        }
        submission
    }
}
