//! Chat phase state machine

use crate::plan::{Plan, PlanView};

/// Where the conversation currently is
///
/// ```text
/// Idle --submit--> AwaitingResponse --ok--> PlanShown
///   ^                     |                    |
///   +------error----------+                    |
///   +------------------clear-------------------+
/// ```
#[derive(Debug, Clone, Default)]
pub enum ChatPhase {
    /// No plan yet; input accepted
    #[default]
    Idle,
    /// A create request is in flight; input disabled
    AwaitingResponse {
        /// Goal the request was sent for
        goal: String,
    },
    /// A plan was received and is being displayed
    PlanShown {
        plan: Box<Plan>,
        /// Show/hide state of the displayed plan
        view: PlanView,
    },
}

impl ChatPhase {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ChatPhase::Idle => "idle",
            ChatPhase::AwaitingResponse { .. } => "awaiting-response",
            ChatPhase::PlanShown { .. } => "plan-shown",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ChatPhase::Idle)
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, ChatPhase::AwaitingResponse { .. })
    }

    pub fn is_plan_shown(&self) -> bool {
        matches!(self, ChatPhase::PlanShown { .. })
    }

    /// The displayed plan, if any
    pub fn plan(&self) -> Option<&Plan> {
        match self {
            ChatPhase::PlanShown { plan, .. } => Some(plan),
            _ => None,
        }
    }
}
