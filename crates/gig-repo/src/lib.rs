#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use async_trait::async_trait;
use gig_types::domain::account::{Account, NewAccount};
use gig_types::domain::order::{Order, OrderDetails};
use gig_types::ports::account_repository::AccountRepository;
use gig_types::ports::order_repository::{OrderRepository, RepoError};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub const DEFAULT_DATABASE_URL: &str = "sqlite://app.db";

/// Store selected at startup by `build_repo`.
#[derive(Clone)]
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        tracing::info!("using in-memory store");
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or(DEFAULT_DATABASE_URL);
        Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    /// With both adapters compiled in, an explicit URL selects SQLite.
    #[cfg(all(feature = "sqlite", feature = "memory"))]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            Some(url) => Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?)),
            None => {
                tracing::info!("no database url, using in-memory store");
                Ok(Self::Memory(memory::InMemoryRepo::new()))
            }
        }
    }
}

#[async_trait]
impl OrderRepository for Repo {
    async fn create(&self, details: OrderDetails) -> Result<Order, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.create(details).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.create(details).await,
        }
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.get(id).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.get(id).await,
        }
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.list().await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.list().await,
        }
    }

    async fn update(&self, id: i64, details: OrderDetails) -> Result<Option<Order>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.update(id, details).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.update(id, details).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.delete(id).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.delete(id).await,
        }
    }
}

#[async_trait]
impl AccountRepository for Repo {
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.create_account(account).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.create_account(account).await,
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.find_by_username(username).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.find_by_username(username).await,
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(r) => r.find_by_email(email).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(r) => r.find_by_email(email).await,
        }
    }
}
