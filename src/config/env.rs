//! Environment variable access.
//!
//! Environment variables are treated as immutable at runtime because
//! modifying them is not thread-safe (requires unsafe in Rust 1.80+).
//! Tests inject a [`MemoryEnvironment`](super::MemoryEnvironment) instead.

/// Read-only view of process environment variables.
pub trait Environment: Send + Sync {
    /// Value of `name`, or `None` when unset or not valid unicode.
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        match std::env::var(name) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(var = name, "Ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_unset() {
        let env = SystemEnvironment;
        assert_eq!(env.var("FONDU_TEST_VAR_THAT_IS_NEVER_SET_42"), None);
    }

    #[test]
    fn test_system_environment_reads_path() {
        // PATH is present in every test runner environment
        assert!(SystemEnvironment.var("PATH").is_some());
    }
}
