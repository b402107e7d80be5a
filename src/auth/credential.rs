//! Credential types.

use std::fmt;
use std::path::PathBuf;

use secrecy::SecretString;

/// Where a credential came from (or where one was looked for).
///
/// Used for diagnostics only; never for authorization decisions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// The `auth_token` tool parameter.
    ExplicitParameter,
    /// A named environment variable.
    EnvironmentVariable(String),
    /// The `fondu.auth_token` field of a config file.
    ConfigFile(PathBuf),
    /// A bare token file.
    TokenFile(PathBuf),
}

impl Provenance {
    /// Stable tag for this kind of source.
    pub fn kind(&self) -> &'static str {
        match self {
            Provenance::ExplicitParameter => "explicit-parameter",
            Provenance::EnvironmentVariable(_) => "environment-variable",
            Provenance::ConfigFile(_) => "config-file",
            Provenance::TokenFile(_) => "token-file",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::ExplicitParameter => write!(f, "parameter `auth_token`"),
            Provenance::EnvironmentVariable(name) => write!(f, "environment variable {}", name),
            Provenance::ConfigFile(path) => write!(f, "config file {}", path.display()),
            Provenance::TokenFile(path) => write!(f, "token file {}", path.display()),
        }
    }
}

/// Authentication token plus its provenance.
///
/// Built fresh for each tool invocation and dropped afterwards. `Debug`
/// output redacts the token.
#[derive(Clone, Debug)]
pub struct Credential {
    token: SecretString,
    provenance: Provenance,
}

impl Credential {
    /// Create a credential. Surrounding whitespace is trimmed.
    pub fn new(token: impl AsRef<str>, provenance: Provenance) -> Self {
        Self {
            token: SecretString::from(token.as_ref().trim().to_string()),
            provenance,
        }
    }

    /// The secret token.
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}
