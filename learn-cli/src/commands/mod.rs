//! CLI command implementations

pub mod chat;
pub mod create;
pub mod get;
pub mod output;
pub mod render;

pub use chat::ChatArgs;
pub use create::CreateArgs;
pub use get::GetArgs;
pub use output::OutputArgs;
pub use render::RenderArgs;
