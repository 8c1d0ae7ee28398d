use gig_hex::application::account_service::AccountService;
use gig_hex::application::order_service::OrderService;
use gig_hex::errors::AppError;
use gig_repo::memory::InMemoryRepo;
use gig_types::domain::order::OrderDetails;

fn details(description: &str) -> OrderDetails {
    OrderDetails {
        description: description.into(),
        contact: "555-1234".into(),
        pickup_location: "A".into(),
        delivery_location: "B".into(),
        delivery_time: "10:00".into(),
        delivery_date: "2024-01-01".into(),
    }
}

// End-to-end service flow against the in-memory adapter.
#[tokio::test]
async fn create_list_update_delete_flow() {
    let repo = InMemoryRepo::new();
    let svc = OrderService::new(repo.clone());

    let order = svc.create_order(details("box")).await.unwrap();

    let list = svc.list_orders().await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, order.id);

    let updated = svc.update_order(order.id, details("crate")).await.unwrap();
    assert_eq!(updated.description, "crate");

    svc.delete_order(order.id).await.unwrap();
    let after_delete = svc.list_orders().await.unwrap();
    assert!(after_delete.is_empty());
}

// Accounts and orders share one store, as they do behind the HTTP server.
#[tokio::test]
async fn accounts_and_orders_share_a_store() {
    let repo = InMemoryRepo::new();
    let accounts = AccountService::new(repo.clone());
    let orders = OrderService::new(repo.clone());

    accounts
        .register("dana", "dana@example.com", "pw")
        .await
        .unwrap();
    orders.create_order(details("box")).await.unwrap();

    assert_eq!(repo.accounts.len(), 1);
    assert_eq!(repo.orders.len(), 1);

    let denied = accounts.login("dana@example.com", "wrong").await;
    assert!(matches!(denied, Err(AppError::Unauthorized(_))));
    accounts.login("dana@example.com", "pw").await.unwrap();
}
