use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gig_types::domain::account::{Account, NewAccount};
use gig_types::domain::order::{Order, OrderDetails};
use gig_types::ports::account_repository::AccountRepository;
use gig_types::ports::order_repository::{OrderRepository, RepoError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct InMemoryRepo {
    pub orders: Arc<DashMap<i64, Order>>,
    /// Keyed by username.
    pub accounts: Arc<DashMap<String, Account>>,
    next_order_id: Arc<AtomicI64>,
    next_account_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(DashMap::new()),
            accounts: Arc::new(DashMap::new()),
            next_order_id: Arc::new(AtomicI64::new(1)),
            next_account_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, details: OrderDetails) -> Result<Order, RepoError> {
        let id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        let order = Order::new(id, details);
        self.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        Ok(self.orders.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let mut list: Vec<Order> = self.orders.iter().map(|kv| kv.value().clone()).collect();
        // DashMap iteration order is arbitrary; mirror the insertion order a table scan gives.
        list.sort_by_key(|o| o.id);
        Ok(list)
    }

    async fn update(&self, id: i64, details: OrderDetails) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.orders.get_mut(&id) {
            v.replace_details(details);
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.orders.remove(&id).is_some())
    }
}

#[async_trait]
impl AccountRepository for InMemoryRepo {
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoError> {
        // Scan before taking the entry lock: iterating while holding a shard write lock deadlocks.
        if self.accounts.iter().any(|kv| kv.email == account.email) {
            return Err(RepoError::Conflict("email".into()));
        }
        match self.accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Err(RepoError::Conflict("username".into())),
            Entry::Vacant(slot) => {
                let id = self.next_account_id.fetch_add(1, Ordering::SeqCst);
                let created = account.with_id(id);
                slot.insert(created.clone());
                Ok(created)
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        Ok(self.accounts.get(username).map(|r| r.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        Ok(self
            .accounts
            .iter()
            .find(|kv| kv.email == email)
            .map(|kv| kv.value().clone()))
    }
}
