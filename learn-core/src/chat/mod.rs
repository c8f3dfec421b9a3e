//! Chat controller
//!
//! Drives a single-turn "what do you want to learn?" conversation: take a
//! goal, request a plan, show it. The conversation state is an explicit
//! [`ChatPhase`] so a request in flight and a shown plan can never coexist.

mod session;
mod state;

pub use session::{
    ChatMessage, ChatSession, Role, Submission, ERROR_MESSAGE, FEEDBACK_MESSAGE, GREETING,
    PLAN_READY_MESSAGE, WORKING_MESSAGE,
};
pub use state::ChatPhase;
