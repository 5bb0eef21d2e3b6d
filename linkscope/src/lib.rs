pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use commands::{CLAP_STYLING, command_argument_builder};
pub use handlers::{build_preferences, load_config, load_store, parse_formats, write_reports};
