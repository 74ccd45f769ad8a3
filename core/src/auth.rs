// core/src/auth.rs

//! The credential check that gates every product operation.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// No credential, or a blank one. The authority is not contacted.
    MissingCredential,
    /// The authority answered with something other than 200.
    Denied { status: u16 },
    /// Transport failure talking to the authority.
    Unreachable(String),
    TimedOut,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MissingCredential => f.write_str("authorization credential is missing"),
            RejectReason::Denied { status } => write!(f, "credential denied by authority (status {})", status),
            RejectReason::Unreachable(detail) => write!(f, "authority unreachable: {}", detail),
            RejectReason::TimedOut => f.write_str("authority did not answer in time"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Approved,
    Rejected(RejectReason),
}

impl AuthDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, AuthDecision::Approved)
    }
}

/// Confirms with some authority that a caller credential is currently valid.
///
/// Implementations fail closed: anything other than a positive answer from
/// the authority is a rejection.
#[async_trait]
pub trait AuthGate: Send + Sync {
    async fn validate(&self, credential: Option<&str>) -> AuthDecision;
}

/// Returns the credential only if it is present and not blank.
pub fn usable_credential(credential: Option<&str>) -> Option<&str> {
    credential.filter(|c| !c.trim().is_empty())
}

/// An [`AuthGate`] with fixed answers, for tests and local runs.
#[derive(Debug, Default)]
pub struct StaticAuthGate {
    accepted: HashSet<String>,
    authority_calls: Mutex<usize>,
}

impl StaticAuthGate {
    /// Approves exactly the given credentials.
    pub fn accepting<I, S>(credentials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticAuthGate {
            accepted: credentials.into_iter().map(Into::into).collect(),
            authority_calls: Mutex::new(0),
        }
    }

    pub fn rejecting_all() -> Self {
        StaticAuthGate::default()
    }

    /// How many validations got past the missing-credential check.
    pub fn authority_calls(&self) -> usize {
        *self.authority_calls.lock()
    }
}

#[async_trait]
impl AuthGate for StaticAuthGate {
    async fn validate(&self, credential: Option<&str>) -> AuthDecision {
        let Some(credential) = usable_credential(credential) else {
            return AuthDecision::Rejected(RejectReason::MissingCredential);
        };
        *self.authority_calls.lock() += 1;
        if self.accepted.contains(credential) {
            AuthDecision::Approved
        } else {
            AuthDecision::Rejected(RejectReason::Denied { status: 401 })
        }
    }
}
