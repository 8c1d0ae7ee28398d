use async_trait::async_trait;

use super::RepoError;
use crate::domain::account::{Account, NewAccount};

#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Fails with `RepoError::Conflict("username" | "email")` on a duplicate.
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError>;
}
