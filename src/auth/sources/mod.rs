//! Credential source implementations, one per precedence step.

mod config_file;
mod environment;
mod explicit;
mod token_file;

pub use config_file::ConfigFileSource;
pub use environment::EnvironmentSource;
pub use explicit::ExplicitSource;
pub use token_file::TokenFileSource;
