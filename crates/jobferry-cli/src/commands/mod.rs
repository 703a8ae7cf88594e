//! CLI commands

mod serve;

pub use serve::ServeCommand;
