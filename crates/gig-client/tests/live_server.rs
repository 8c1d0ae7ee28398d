use gig_client::{error_status, GigClient, RegisterRequest};
use gig_hex::application::account_service::AccountService;
use gig_hex::application::order_service::OrderService;
use gig_hex::inbound::http::{HttpServer, HttpServerConfig};
use gig_repo::memory::InMemoryRepo;
use gig_types::domain::order::OrderDetails;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

// Client against a real server backed by the in-memory adapter.
#[tokio::test]
async fn client_drives_every_route() {
    let port = find_free_port();
    let repo = InMemoryRepo::new();
    let server = HttpServer::new(
        OrderService::new(repo.clone()),
        AccountService::new(repo),
        HttpServerConfig {
            port: port.to_string(),
        },
    )
    .await
    .unwrap();
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let client = GigClient::new(&format!("http://127.0.0.1:{port}/")).unwrap();

    client
        .register(&RegisterRequest {
            username: "erin".into(),
            email: "erin@example.com".into(),
            password: "pw".into(),
        })
        .await
        .unwrap();
    client.login("erin@example.com", "pw").await.unwrap();
    let err = client.login("erin@example.com", "nope").await.unwrap_err();
    assert_eq!(error_status(&err), Some(reqwest::StatusCode::UNAUTHORIZED));

    let details = OrderDetails {
        description: "box".into(),
        contact: "555-1234".into(),
        pickup_location: "A".into(),
        delivery_location: "B".into(),
        delivery_time: "10:00".into(),
        delivery_date: "2024-01-01".into(),
    };
    let created = client.create_order(&details).await.unwrap();
    assert_eq!(created.details(), details);

    assert_eq!(client.view_orders().await.unwrap(), vec![created.clone()]);

    let mut next = details.clone();
    next.delivery_date = "2024-03-03".into();
    let updated = client.update_order(created.id, &next).await.unwrap();
    assert_eq!(updated.delivery_date, "2024-03-03");

    client.delete_order(created.id).await.unwrap();
    let err = client.get_order(created.id).await.unwrap_err();
    assert_eq!(error_status(&err), Some(reqwest::StatusCode::NOT_FOUND));
    assert!(client.list_orders().await.unwrap().is_empty());

    handle.abort();
}
