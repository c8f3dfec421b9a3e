//! Learning plans
//!
//! This module holds the recursive plan tree returned by the backend,
//! the per-node view state used while browsing it, and the text and
//! Markdown renderers.

mod markdown;
mod model;
mod render;

pub use markdown::{anchor_name, plan_markdown};
pub use model::{Exercise, NodePath, Plan, Resource, Subject};
pub use render::{LineKind, NodeView, PlanView, RenderedLine, Renderer};
