use async_trait::async_trait;
use gig_types::domain::account::{Account, NewAccount};
use gig_types::domain::order::{Order, OrderDetails};
use gig_types::ports::account_repository::AccountRepository;
use gig_types::ports::order_repository::{OrderRepository, RepoError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

const ORDER_COLUMNS: &str =
    "id, description, contact, pickup_location, delivery_location, delivery_time, delivery_date";
const ACCOUNT_COLUMNS: &str = "id, username, email, password_hash";

#[derive(Clone)]
pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    description: String,
    contact: String,
    pickup_location: String,
    delivery_location: String,
    delivery_time: String,
    delivery_date: String,
}

impl From<DbOrder> for Order {
    fn from(row: DbOrder) -> Self {
        Order {
            id: row.id,
            description: row.description,
            contact: row.contact,
            pickup_location: row.pickup_location,
            delivery_location: row.delivery_location,
            delivery_time: row.delivery_time,
            delivery_date: row.delivery_date,
        }
    }
}

#[derive(FromRow)]
struct DbAccount {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
}

impl From<DbAccount> for Account {
    fn from(row: DbAccount) -> Self {
        Account {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::DbError(e.to_string())
}

fn insert_err(e: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            // SQLite reports "UNIQUE constraint failed: accounts.<column>".
            let column = if db.message().contains("accounts.username") {
                "username"
            } else {
                "email"
            };
            return RepoError::Conflict(column.into());
        }
    }
    db_err(e)
}

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure on-disk SQLite target directory exists.
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if !in_memory {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Every connection to ":memory:" opens its own database.
        let mut pool_options = SqlitePoolOptions::new();
        if in_memory {
            pool_options = pool_options.max_connections(1);
        }
        let pool = pool_options.connect_with(options).await?;

        let repo = Self { pool };
        repo.init_schema().await?;
        tracing::info!(url = %database_url, "sqlite store ready");
        Ok(repo)
    }

    /// Idempotent: every statement is `CREATE TABLE IF NOT EXISTS`.
    pub async fn init_schema(&self) -> anyhow::Result<()> {
        let migrations = [
            include_str!("../migrations/0001_create_accounts.sql"),
            include_str!("../migrations/0002_create_orders.sql"),
        ];
        for ddl in migrations {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create(&self, details: OrderDetails) -> Result<Order, RepoError> {
        let row: DbOrder = sqlx::query_as(&format!(
            "INSERT INTO orders (description, contact, pickup_location, delivery_location, delivery_time, delivery_date)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&details.description)
        .bind(&details.contact)
        .bind(&details.pickup_location)
        .bind(&details.delivery_location)
        .bind(&details.delivery_time)
        .bind(&details.delivery_date)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> =
            sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Order::from))
    }

    async fn list(&self) -> Result<Vec<Order>, RepoError> {
        let rows: Vec<DbOrder> = sqlx::query_as(&format!("SELECT {ORDER_COLUMNS} FROM orders"))
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn update(&self, id: i64, details: OrderDetails) -> Result<Option<Order>, RepoError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;
        let row: Option<DbOrder> = sqlx::query_as(&format!(
            "UPDATE orders
             SET description = ?, contact = ?, pickup_location = ?, delivery_location = ?, delivery_time = ?, delivery_date = ?
             WHERE id = ?
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(&details.description)
        .bind(&details.contact)
        .bind(&details.pickup_location)
        .bind(&details.delivery_location)
        .bind(&details.delivery_time)
        .bind(&details.delivery_date)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err)?;
        tx.commit().await.map_err(db_err)?;
        Ok(row.map(Order::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl AccountRepository for SqliteRepo {
    async fn create_account(&self, account: NewAccount) -> Result<Account, RepoError> {
        let row: DbAccount = sqlx::query_as(&format!(
            "INSERT INTO accounts (username, email, password_hash) VALUES (?, ?, ?)
             RETURNING {ACCOUNT_COLUMNS}"
        ))
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_err)?;
        Ok(row.into())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepoError> {
        let row: Option<DbAccount> = sqlx::query_as(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, RepoError> {
        let row: Option<DbAccount> =
            sqlx::query_as(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(row.map(Account::from))
    }
}
