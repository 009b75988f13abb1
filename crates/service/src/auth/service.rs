use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, LoginInput, NewUser, RegisterInput, User};
use super::errors::AuthError;
use super::repository::UserRepository;
use super::token;
use crate::metrics::AUTH_FAILURES_TOTAL;
use crate::policy::{Identity, Role};

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

fn normalize_email(email: &str) -> String { email.trim().to_lowercase() }

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Register a new account and sign it in.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, domain::RegisterInput};
    /// use service::storage::memory::MemoryStore;
    /// use std::sync::Arc;
    /// let store = Arc::new(MemoryStore::default());
    /// let svc = AuthService::new(store, AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let input = RegisterInput { name: "Asha".into(), email: "Asha@Example.com".into(), password: "Secret123".into(), role: None };
    /// let session = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(session.user.email, "asha@example.com");
    /// assert_eq!(session.user.role.as_str(), "customer");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthSession, AuthError> {
        let role = input.role.unwrap_or(Role::Customer);
        if role == Role::Admin {
            return Err(AuthError::Validation("cannot self-register as admin".into()));
        }
        if input.name.trim().is_empty() {
            return Err(AuthError::Validation("name required".into()));
        }
        let email = normalize_email(&input.email);
        if !email.contains('@') {
            return Err(AuthError::Validation("invalid email".into()));
        }
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            debug!(user_id = %existing.id, "email already registered");
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .repo
            .create_user(NewUser { name: input.name.trim().to_string(), email, password_hash, role, is_verified: false })
            .await?;
        info!(user_id = %user.id, role = %user.role, "user_registered");
        self.session_for(user)
    }

    /// Authenticate by email and password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, domain::{RegisterInput, LoginInput}};
    /// use service::storage::memory::MemoryStore;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MemoryStore::default()), AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 });
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into(), role: None }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let email = normalize_email(&input.email);
        let Some(user) = self.repo.find_user_by_email(&email).await? else {
            AUTH_FAILURES_TOTAL.inc();
            return Err(AuthError::Unauthorized);
        };
        let cred = self.repo.get_credentials(user.id).await?.ok_or(AuthError::Unauthorized)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            AUTH_FAILURES_TOTAL.inc();
            warn!(user_id = %user.id, "login_rejected");
            return Err(AuthError::Unauthorized);
        }

        info!(user_id = %user.id, "user_logged_in");
        self.session_for(user)
    }

    /// Current account behind a verified token.
    pub async fn me(&self, identity: &Identity) -> Result<User, AuthError> {
        self.repo.find_user(identity.id).await?.ok_or(AuthError::NotFound)
    }

    /// Decode a bearer token into the caller's identity.
    pub fn verify_token(&self, raw: &str) -> Result<Identity, AuthError> {
        token::verify(&self.cfg.jwt_secret, raw).inspect_err(|_| AUTH_FAILURES_TOTAL.inc())
    }

    /// Make sure an admin account with `email` exists. An existing account
    /// with that email is returned untouched.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn ensure_admin(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        let email = normalize_email(email);
        if let Some(existing) = self.repo.find_user_by_email(&email).await? {
            if existing.role != Role::Admin {
                warn!(user_id = %existing.id, role = %existing.role, "bootstrap email belongs to a non-admin account");
            }
            return Ok(existing);
        }
        if password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        let password_hash = hash_password(password)?;
        let user = self
            .repo
            .create_user(NewUser { name: name.trim().to_string(), email, password_hash, role: Role::Admin, is_verified: true })
            .await?;
        info!(user_id = %user.id, "admin_bootstrapped");
        Ok(user)
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = token::issue(&self.cfg.jwt_secret, self.cfg.token_ttl_hours, user.id, user.role)?;
        Ok(AuthSession { token, user })
    }
}
