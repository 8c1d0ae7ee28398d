use crate::application::password::{hash_password, verify_password};
use crate::errors::AppError;
use gig_types::domain::account::{Account, NewAccount};
use gig_types::ports::account_repository::AccountRepository;
use gig_types::ports::RepoError;

pub struct AccountService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new account.
    ///
    /// All three fields must be non-empty. A taken username is rejected up
    /// front; a taken email is caught by the store's unique constraint.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AppError> {
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Username, email, and password are required".into(),
            ));
        }

        if self.repo.find_by_username(username).await?.is_some() {
            return Err(username_taken());
        }

        let password_hash = hash_password(password).map_err(|e| AppError::Internal(e.into()))?;

        let account = self
            .repo
            .create_account(NewAccount {
                username: username.to_owned(),
                email: email.to_owned(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepoError::Conflict(column) if column == "username" => username_taken(),
                RepoError::Conflict(_) => AppError::Conflict("Email already exists".into()),
                other => other.into(),
            })?;

        tracing::info!(account_id = account.id, username = %account.username, "account registered");
        Ok(account)
    }

    /// Check credentials. Nothing is issued on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let Some(account) = self.repo.find_by_email(email).await? else {
            tracing::info!("login rejected: unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &account.password_hash) {
            tracing::info!(account_id = account.id, "login rejected: bad password");
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(account_id = account.id, "login succeeded");
        Ok(account)
    }
}

fn username_taken() -> AppError {
    AppError::Conflict("Username already exists".into())
}
