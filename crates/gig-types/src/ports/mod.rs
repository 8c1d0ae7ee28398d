pub mod account_repository;
pub mod order_repository;

pub use order_repository::RepoError;

/// A single store that backs both accounts and orders.
pub trait GigRepository:
    order_repository::OrderRepository + account_repository::AccountRepository
{
}

impl<T> GigRepository for T where
    T: order_repository::OrderRepository + account_repository::AccountRepository
{
}
