//! Authentication and authorization system
//!
//! Registration, login, bearer token checks, group permissions and the
//! account approval actions.

mod approval;
pub mod jwt;
pub mod rbac;
pub mod types;

pub use rbac::Permission;
pub use types::{AccountInfo, LoginRequest, LoginResponse, RegisterRequest};

use crate::config::AuthConfig;
use crate::core::models::user::NewUser;
use crate::core::models::{RequestContext, User};
use crate::storage::StorageLayer;
use crate::utils::auth::{hash_password, verify_password};
use crate::utils::error::{QualityError, Result};
use crate::utils::validation::AccountValidator;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main authentication system
#[derive(Debug, Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage layer for user data
    storage: Arc<StorageLayer>,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
    /// RBAC system
    rbac: Arc<rbac::RbacSystem>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(config: &AuthConfig, storage: Arc<StorageLayer>) -> Self {
        info!("Initializing authentication system");

        let config = Arc::new(config.clone());
        let jwt = Arc::new(jwt::JwtHandler::new(&config));
        let rbac = Arc::new(rbac::RbacSystem::new());

        Self {
            config,
            storage,
            jwt,
            rbac,
        }
    }

    /// Register a new account awaiting approval
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let username = request.username.trim().to_string();
        info!("Registering user: {}", username);

        AccountValidator::validate_username(&username)?;
        AccountValidator::validate_password(&request.password)?;
        let email = blank_to_none(request.email);
        if let Some(email) = &email {
            AccountValidator::validate_email(email)?;
        }

        let job_title = blank_to_none(request.job_title);
        if job_title.as_ref().is_some_and(|t| t.chars().count() > 120) {
            return Err(QualityError::validation(
                "job_title: must be at most 120 characters",
            ));
        }
        let phone = blank_to_none(request.phone);
        if phone.as_ref().is_some_and(|p| p.chars().count() > 30) {
            return Err(QualityError::validation("phone: must be at most 30 characters"));
        }

        if self
            .storage
            .db()
            .find_user_by_username(&username)
            .await?
            .is_some()
        {
            return Err(QualityError::conflict(format!(
                "Username {} is already taken",
                username
            )));
        }

        let password_hash = hash_password(&request.password)?;

        self.storage
            .db()
            .create_user(NewUser {
                username,
                email,
                password_hash,
                first_name: request.first_name.trim().to_string(),
                last_name: request.last_name.trim().to_string(),
                is_active: false,
                is_staff: false,
                is_superuser: false,
                job_title,
                phone,
            })
            .await
    }

    /// Check credentials and issue an access token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        info!("User login attempt: {}", request.username);

        let user = self
            .storage
            .db()
            .find_user_by_username(request.username.trim())
            .await?
            .ok_or_else(|| QualityError::auth("Invalid username or password"))?;

        if !verify_password(&request.password, &user.password_hash)? {
            return Err(QualityError::auth("Invalid username or password"));
        }

        if !user.is_active {
            return Err(QualityError::auth("Account is pending approval"));
        }

        let access_token = self.jwt.create_access_token(user.id, &user.username)?;
        self.storage.db().update_last_login(user.id).await?;

        info!("User logged in successfully: {}", user.username);
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiration(),
            user,
        })
    }

    /// Resolve a bearer token into a context carrying the active user
    pub async fn authenticate_token(
        &self,
        token: &str,
        context: RequestContext,
    ) -> Result<RequestContext> {
        let claims = self
            .jwt
            .verify_token(token)
            .map_err(|_| QualityError::unauthorized("Invalid or expired token"))?;

        let user = self
            .storage
            .db()
            .find_user_by_id(claims.sub)
            .await?
            .ok_or_else(|| QualityError::unauthorized("User not found"))?;

        if !user.is_active {
            warn!("Token presented for inactive user {}", user.username);
            return Err(QualityError::unauthorized("User account is not active"));
        }

        debug!("Authenticated request {} as {}", context.request_id, user.username);
        Ok(context.with_user(user))
    }

    /// Acting user of the context, checked against a permission
    pub fn authorize<'a>(&self, context: &'a RequestContext, permission: Permission) -> Result<&'a User> {
        let user = context
            .user
            .as_ref()
            .ok_or_else(|| QualityError::unauthorized("Authentication required"))?;

        self.rbac.require(user, permission)?;
        Ok(user)
    }

    /// Acting user of the context, required to be staff or superuser
    pub fn require_admin<'a>(&self, context: &'a RequestContext) -> Result<&'a User> {
        let user = context
            .user
            .as_ref()
            .ok_or_else(|| QualityError::unauthorized("Authentication required"))?;

        if !user.is_admin() {
            return Err(QualityError::forbidden(
                "Only administrators can manage user accounts",
            ));
        }
        Ok(user)
    }

    /// Account details of the acting user
    pub async fn account_info(&self, context: &RequestContext) -> Result<AccountInfo> {
        let user = context
            .user
            .clone()
            .ok_or_else(|| QualityError::unauthorized("Authentication required"))?;

        let profile = self.storage.db().find_profile(user.id).await?;
        let mut permissions: Vec<Permission> =
            self.rbac.get_user_permissions(&user).into_iter().collect();
        permissions.sort();

        Ok(AccountInfo {
            user,
            profile,
            permissions,
        })
    }

    /// Create the configured superuser if it does not exist yet
    pub async fn ensure_bootstrap_admin(&self) -> Result<()> {
        let Some(admin) = &self.config.bootstrap_admin else {
            return Ok(());
        };

        if self
            .storage
            .db()
            .find_user_by_username(&admin.username)
            .await?
            .is_some()
        {
            debug!("Bootstrap admin {} already exists", admin.username);
            return Ok(());
        }

        AccountValidator::validate_username(&admin.username)?;
        AccountValidator::validate_password(&admin.password)?;

        self.storage
            .db()
            .create_user(NewUser {
                username: admin.username.clone(),
                email: blank_to_none(admin.email.clone()),
                password_hash: hash_password(&admin.password)?,
                first_name: String::new(),
                last_name: String::new(),
                is_active: true,
                is_staff: true,
                is_superuser: true,
                job_title: None,
                phone: None,
            })
            .await?;

        info!("Created bootstrap admin {}", admin.username);
        Ok(())
    }

    /// RBAC system
    pub fn rbac(&self) -> &rbac::RbacSystem {
        &self.rbac
    }
}
