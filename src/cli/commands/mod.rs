//! CLI command implementations

pub mod completions;
pub mod config;
pub mod find;
pub mod install;

pub use completions::execute as completions;
pub use config::execute as config;
pub use find::execute as find;
pub use install::execute as install;
