use crate::errors::AppError;
use gig_types::domain::order::{Order, OrderDetails};
use gig_types::ports::order_repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(&self, details: OrderDetails) -> Result<Order, AppError> {
        let order = self.repo.create(details).await?;
        tracing::info!(order_id = order.id, "order created");
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        match self.repo.get(id).await? {
            Some(o) => Ok(o),
            None => Err(AppError::order_not_found()),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repo.list().await?)
    }

    /// Replaces all six fields; there is no merge with the stored values.
    pub async fn update_order(&self, id: i64, details: OrderDetails) -> Result<Order, AppError> {
        match self.repo.update(id, details).await? {
            Some(o) => {
                tracing::info!(order_id = id, "order updated");
                Ok(o)
            }
            None => Err(AppError::order_not_found()),
        }
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(order_id = id, "order deleted");
            Ok(())
        } else {
            Err(AppError::order_not_found())
        }
    }
}
