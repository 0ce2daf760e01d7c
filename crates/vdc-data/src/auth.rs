//! Auth collaborator surface.
//!
//! Authentication itself is owned by the hosted platform; the commerce core
//! only ever asks "who, if anyone, is signed in right now".

use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the hosted platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// Platform-assigned user id.
    pub id: String,
    /// Account email.
    pub email: String,
}

/// Resolves the current user for a session.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, or None for an anonymous session.
    async fn current_user(&self) -> Result<Option<AuthUser>, StoreError>;
}

/// A fixed-answer [`AuthProvider`] for local development and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<AuthUser>,
}

impl StaticAuth {
    /// An always-anonymous session.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// A session signed in as the given user.
    pub fn signed_in(user: AuthUser) -> Self {
        Self { user: Some(user) }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user(&self) -> Result<Option<AuthUser>, StoreError> {
        Ok(self.user.clone())
    }
}
