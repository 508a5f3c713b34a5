//! CLI command handlers. Each command is in its own file.

mod completions;
mod mount;
mod resolve;

pub use completions::{run_completions, run_man};
pub use mount::run_mount;
pub use resolve::run_resolve;
