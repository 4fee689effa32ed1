//! Tokens and artifacts shared between test steps
//!
//! Earlier steps (logins, creations) write here and later steps read.
//! A missing entry is an expected condition: the step that would have
//! produced it has already been recorded as failed, so dependents skip.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::http::value_text;

/// Opaque bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep credentials out of logs and failure details
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token(<{} bytes>)", self.0.len())
    }
}

/// Identity a token belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
    Admin,
    User,
    /// Role named by a test plan
    Custom(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::User => "user",
            Role::Custom(name) => name,
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "owner" => Role::Owner,
            "admin" => Role::Admin,
            "user" => Role::User,
            other => Role::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a value produced by one step and consumed by another
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtifactKey {
    CompanyId,
    UserId,
    EmployeeId,
    EmployeeQr,
    TimeEntryId,
    /// Key named by a test plan
    Custom(String),
}

impl ArtifactKey {
    pub fn as_str(&self) -> &str {
        match self {
            ArtifactKey::CompanyId => "company_id",
            ArtifactKey::UserId => "user_id",
            ArtifactKey::EmployeeId => "employee_id",
            ArtifactKey::EmployeeQr => "employee_qr",
            ArtifactKey::TimeEntryId => "time_entry_id",
            ArtifactKey::Custom(name) => name,
        }
    }
}

impl From<&str> for ArtifactKey {
    fn from(s: &str) -> Self {
        match s {
            "company_id" => ArtifactKey::CompanyId,
            "user_id" => ArtifactKey::UserId,
            "employee_id" => ArtifactKey::EmployeeId,
            "employee_qr" => ArtifactKey::EmployeeQr,
            "time_entry_id" => ArtifactKey::TimeEntryId,
            other => ArtifactKey::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prerequisite that an earlier step failed to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing(String);

impl Missing {
    pub fn new(what: impl Into<String>) -> Self {
        Self(what.into())
    }

    pub fn token(role: &Role) -> Self {
        Self(format!("{} token", role))
    }

    pub fn artifact(key: &ArtifactKey) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prerequisite unavailable: {}", self.0)
    }
}

/// Process-lifetime store of tokens and artifacts
#[derive(Debug, Default)]
pub struct Session {
    tokens: HashMap<Role, Token>,
    artifacts: HashMap<ArtifactKey, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_token(&mut self, role: Role, token: Token) {
        tracing::debug!(%role, "token stored");
        self.tokens.insert(role, token);
    }

    pub fn token(&self, role: &Role) -> Option<&Token> {
        self.tokens.get(role)
    }

    pub fn require_token(&self, role: &Role) -> Result<Token, Missing> {
        self.token(role).cloned().ok_or_else(|| Missing::token(role))
    }

    pub fn set_artifact(&mut self, key: ArtifactKey, value: Value) {
        tracing::debug!(%key, %value, "artifact stored");
        self.artifacts.insert(key, value);
    }

    pub fn artifact(&self, key: &ArtifactKey) -> Option<&Value> {
        self.artifacts.get(key)
    }

    /// Artifact rendered as text (ids may be numbers or strings)
    pub fn artifact_str(&self, key: &ArtifactKey) -> Option<String> {
        self.artifact(key).and_then(value_text)
    }

    /// Artifact text for request paths and bodies
    ///
    /// Any stored value counts as present. Objects and arrays render as
    /// compact JSON.
    pub fn require_artifact(&self, key: &ArtifactKey) -> Result<String, Missing> {
        let value = self.artifact(key).ok_or_else(|| Missing::artifact(key))?;
        Ok(value_text(value).unwrap_or_else(|| value.to_string()))
    }
}
