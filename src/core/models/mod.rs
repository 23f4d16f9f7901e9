//! Core data models

pub mod audit;
pub mod batch;
pub mod project;
pub mod user;

pub use audit::{AuditAction, AuditEntry};
pub use batch::{Batch, BatchFilter, BatchView, DocumentSet};
pub use project::{Project, ProjectFilter, ProjectSummary};
pub use user::{Group, User, UserProfile, UserStatus};

use uuid::Uuid;

/// Per-request context carrying the acting user
///
/// Built by the authentication middleware and handed down explicitly to
/// services and storage calls that need to know who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID
    pub request_id: String,
    /// Authenticated user (if any)
    pub user: Option<User>,
    /// Client IP address
    pub client_ip: Option<String>,
    /// User agent
    pub user_agent: Option<String>,
    /// Request timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            user: None,
            client_ip: None,
            user_agent: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl RequestContext {
    /// Create new request context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authenticated user
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Set client information
    pub fn with_client_info(mut self, ip: Option<String>, user_agent: Option<String>) -> Self {
        self.client_ip = ip;
        self.user_agent = user_agent;
        self
    }

    /// ID of the acting user, recorded on audit rows
    pub fn actor_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }
}
