//! CLI commands

pub mod context;
pub mod create;
pub mod merge;
pub mod run;
pub mod style;
pub mod terminal;

pub use context::CommandContext;
pub use create::run_create;
pub use merge::run_merge;
pub use run::{RunOptions, run_flow};
pub use terminal::TerminalPrompter;
