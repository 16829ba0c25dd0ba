use std::fmt;

#[cfg(test)]
use mockall::automock;

/// Secret token authorizing calls to the generative service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(****)")
    }
}

/// Resolves the credential for a single call. Nothing is cached between calls.
#[cfg_attr(test, automock)]
pub trait CredentialProvider: Send + Sync {
    fn resolve(&self) -> Option<Credential>;

    /// Where the credential is expected to come from, for diagnostics.
    fn source(&self) -> String;
}

/// Reads the named environment variable each time it is resolved.
#[derive(Debug, Clone)]
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialProvider for EnvCredential {
    fn resolve(&self) -> Option<Credential> {
        std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Credential)
    }

    fn source(&self) -> String {
        self.var.clone()
    }
}

/// Fixed credential, for embedding callers and tests.
#[derive(Debug, Clone)]
pub struct StaticCredential(Option<Credential>);

impl StaticCredential {
    pub fn new(token: Option<&str>) -> Self {
        Self(token.map(Credential::new))
    }
}

impl CredentialProvider for StaticCredential {
    fn resolve(&self) -> Option<Credential> {
        self.0.clone()
    }

    fn source(&self) -> String {
        "static credential".to_string()
    }
}
