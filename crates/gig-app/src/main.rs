use gig_hex::application::account_service::AccountService;
use gig_hex::application::order_service::OrderService;
use gig_hex::config::Config;
use gig_hex::inbound::http::{HttpServer, HttpServerConfig};
use gig_repo::{build_repo, Repo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for DATABASE_URL / SERVER_PORT when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    // Schema is created here, before the listener binds.
    let repo: Repo = build_repo(config.database_url.as_deref()).await?;
    let orders = OrderService::new(repo.clone());
    let accounts = AccountService::new(repo);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
    };

    let http = HttpServer::new(orders, accounts, server_cfg).await?;
    http.run().await
}
