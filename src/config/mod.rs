//! Configuration and CLI handling

pub mod cli;
pub mod settings;

pub use cli::{Cli, Command, FileArgs};
pub use settings::Settings;
