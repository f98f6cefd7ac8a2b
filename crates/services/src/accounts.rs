//! # AccountService
//!
//! Registration and credential resolution. Passwords only ever cross this
//! boundary in plaintext on the way into the one-way hasher; documents and
//! responses carry the hash or nothing.

use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use domains::ports::{PasswordHasher, TokenService, UserRepo};
use domains::{AppError, Result, User};

pub struct AccountService {
    users: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self { users, hasher, tokens }
    }

    /// Registers a new account. Fails with Conflict when the email is
    /// already taken.
    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<Uuid> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(AppError::ValidationError(
                "username, email and password are required".into(),
            ));
        }
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AppError::Conflict(format!("email {email} is already registered")));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password_hash: self.hasher.hash(password)?,
        };
        let id = user.id;
        self.users.insert(user).await?;
        debug!(user_id = %id, "user registered");
        Ok(id)
    }

    /// Verifies credentials and returns a signed bearer token.
    ///
    /// Unknown email and wrong password collapse into the same
    /// Unauthorized so the response does not leak which one failed.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AppError::Unauthorized("invalid credentials".into()));
        }
        self.tokens.issue(user.id)
    }

    /// Resolves a bearer token to the caller's user id.
    pub fn resolve_token(&self, token: &str) -> Result<Uuid> {
        self.tokens.resolve(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domains::ports::{MockPasswordHasher, MockTokenService, MockUserRepo};

    fn sample_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    fn service(
        users: MockUserRepo,
        hasher: MockPasswordHasher,
        tokens: MockTokenService,
    ) -> AccountService {
        AccountService::new(Arc::new(users), Arc::new(hasher), Arc::new(tokens))
    }

    #[tokio::test]
    async fn register_hashes_and_stores() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_insert()
            .withf(|u| u.password_hash == "hashed" && u.email == "a@b.c")
            .returning(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().returning(|_| Ok("hashed".into()));

        let svc = service(users, hasher, MockTokenService::new());
        svc.register("alice", "a@b.c", "secret").await.unwrap();
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .returning(|e| Ok(Some(sample_user(e))));
        users.expect_insert().times(0);

        let svc = service(users, MockPasswordHasher::new(), MockTokenService::new());
        let err = svc.register("alice", "a@b.c", "secret").await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn authenticate_issues_token_on_valid_credentials() {
        let user = sample_user("a@b.c");
        let user_id = user.id;
        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| true);
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .withf(move |id| *id == user_id)
            .returning(|_| Ok("signed".into()));

        let svc = service(users, hasher, tokens);
        assert_eq!(svc.authenticate("a@b.c", "secret").await.unwrap(), "signed");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let mut users = MockUserRepo::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        let svc = service(users, MockPasswordHasher::new(), MockTokenService::new());
        let missing = svc.authenticate("x@y.z", "pw").await.unwrap_err();

        let mut users = MockUserRepo::new();
        users
            .expect_find_by_email()
            .returning(|e| Ok(Some(sample_user(e))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| false);
        let svc = service(users, hasher, MockTokenService::new());
        let wrong = svc.authenticate("a@b.c", "pw").await.unwrap_err();

        assert_eq!(missing.to_string(), wrong.to_string());
    }
}
