///  To run :
///  cargo r --example client_example
use gig_client::{error_status, GigClient, RegisterRequest};
use gig_hex::application::account_service::AccountService;
use gig_hex::application::order_service::OrderService;
use gig_hex::inbound::http::{HttpServer, HttpServerConfig};
use gig_repo::build_repo;
use gig_types::domain::order::OrderDetails;
use tempfile::tempdir;

fn find_free_port() -> anyhow::Result<u16> {
    Ok(std::net::TcpListener::bind("127.0.0.1:0")?
        .local_addr()?
        .port())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let port = find_free_port()?;
    let addr = format!("http://127.0.0.1:{port}/");

    // Temp file-backed SQLite DB so every pooled connection sees the same data.
    let tmp = tempdir()?;
    let db_path = tmp.path().join("app.db");
    let db_url = format!("sqlite://{}", db_path.display());

    let repo = build_repo(Some(&db_url)).await?;
    let server = HttpServer::new(
        OrderService::new(repo.clone()),
        AccountService::new(repo),
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await?;

    let handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("server error: {e:#}");
        }
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = GigClient::new(&addr)?;
    let registered = client
        .register(&RegisterRequest {
            username: "courier".into(),
            email: "courier@example.com".into(),
            password: "correct horse".into(),
        })
        .await?;
    println!("{}", registered.message);

    let login = client.login("courier@example.com", "correct horse").await?;
    println!("{}", login.message);

    if let Err(err) = client.login("courier@example.com", "wrong").await {
        println!("Bad password rejected with {:?}", error_status(&err));
    }

    let created = client
        .create_order(&OrderDetails {
            description: "box of books".into(),
            contact: "555-1234".into(),
            pickup_location: "12 Market St".into(),
            delivery_location: "99 Harbor Rd".into(),
            delivery_time: "10:00".into(),
            delivery_date: "2024-01-01".into(),
        })
        .await?;
    println!("Created order id={}", created.id);

    let mut details = created.details();
    details.delivery_time = "14:30".into();
    let updated = client.update_order(created.id, &details).await?;
    println!(
        "Updated order {} to deliver at {}",
        updated.id, updated.delivery_time
    );

    let listed = client.view_orders().await?;
    println!("{} order(s) on file", listed.len());

    let deleted = client.delete_order(created.id).await?;
    println!("{}", deleted.message);

    handle.abort();
    Ok(())
}
