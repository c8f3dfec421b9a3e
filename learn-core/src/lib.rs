//! Learn Core - Core library for the Learn plan client
//!
//! This crate holds the learning plan data model, the recursive plan
//! renderer, Markdown export, the chat controller state machine, and the
//! configuration shared by the client and CLI crates.

pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod plan;
pub mod secrets;

pub use api::{CreatePlanRequest, GetPlanRequest, PlanApi, PlanResponse};
pub use chat::{ChatMessage, ChatPhase, ChatSession, Role, Submission};
pub use config::{ApiConfig, Config, RenderConfig};
pub use error::{Error, Result};
pub use plan::{
    plan_markdown, Exercise, LineKind, NodePath, NodeView, Plan, PlanView, RenderedLine, Renderer,
    Resource, Subject,
};
pub use secrets::Secrets;
