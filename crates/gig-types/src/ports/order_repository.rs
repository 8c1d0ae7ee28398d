use async_trait::async_trait;

use crate::domain::order::{Order, OrderDetails};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),

    /// A unique column already holds the value; carries the column name.
    #[error("unique constraint failed: {0}")]
    Conflict(String),
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, details: OrderDetails) -> Result<Order, RepoError>;
    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError>;
    async fn list(&self) -> Result<Vec<Order>, RepoError>;
    async fn update(&self, id: i64, details: OrderDetails) -> Result<Option<Order>, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}
