//! API integration tests against a running loan service
//!
//! Run with: PORTARIA_TEST_API_URL=http://localhost:8080/api cargo test -- --ignored

use portaria_console::{
    config::ApiConfig,
    models::{HandoverRequest, ItemForm, ItemKind, LoanRequest, LoanStatus, UserForm, UserRole},
    ApiClient, ConsoleError, PortariaApi,
};

const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

fn client() -> ApiClient {
    let base_url = std::env::var("PORTARIA_TEST_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    ApiClient::new(&ApiConfig {
        base_url,
        ..ApiConfig::default()
    })
    .expect("Failed to build client")
}

fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}{}", prefix, nanos % 10_000_000_000)
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_dashboard() {
    let dashboard = client().dashboard().await.expect("Failed to load dashboard");
    assert!(dashboard.items_available <= dashboard.items_total);
    assert!(dashboard.active_loans <= dashboard.total_loans);
}

#[tokio::test]
#[ignore]
async fn test_unknown_badge_is_not_found() {
    let err = client()
        .read_badge(&unique("missing-"))
        .await
        .expect_err("Unknown badge should fail");
    assert!(matches!(err, ConsoleError::Api { status: 404, .. }));
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_item() {
    let client = client();

    let created = client
        .create_item(&ItemForm {
            name: unique("Test key "),
            kind: ItemKind::Key,
            available: true,
            location: "Test shelf".to_string(),
        })
        .await
        .expect("Failed to create item");

    let toggled = client
        .set_item_availability(&created.id, false)
        .await
        .expect("Failed to toggle availability");
    assert!(!toggled.available);

    let mut form = ItemForm::from(&toggled);
    form.location = "Other shelf".to_string();
    let updated = client.update_item(&created.id, &form).await.expect("Failed to update item");
    assert_eq!(updated.location, "Other shelf");

    client.delete_item(&created.id).await.expect("Failed to delete item");
    assert!(client.get_item(&created.id).await.is_err());
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = client();
    let badge = unique("9");

    let user = client
        .create_user(&UserForm {
            name: "Integration User".to_string(),
            role: UserRole::Student,
            badge: badge.clone(),
            email: format!("{}@example.org", badge),
        })
        .await
        .expect("Failed to create user");
    let item = client
        .create_item(&ItemForm {
            name: unique("Loan key "),
            kind: ItemKind::Key,
            available: true,
            location: "Desk".to_string(),
        })
        .await
        .expect("Failed to create item");

    let loan = client
        .create_loan(&LoanRequest {
            item_id: item.id.clone(),
            user_badge: badge.clone(),
        })
        .await
        .expect("Failed to create loan");
    assert_eq!(loan.status, LoanStatus::Reserved);

    let available = client.list_available_items().await.expect("Failed to list items");
    assert!(available.iter().all(|i| i.id != item.id));

    let handover = HandoverRequest {
        user_badge: badge.clone(),
    };
    let picked = client
        .register_pickup(&loan.id, &handover)
        .await
        .expect("Failed to register pickup");
    assert_eq!(picked.status, LoanStatus::PickedUp);

    let returned = client
        .return_by_badge(&badge, &loan.id)
        .await
        .expect("Failed to register return");
    assert_eq!(returned.status, LoanStatus::Returned);

    let active = client.active_loans_by_badge(&badge).await.expect("Failed to list loans");
    assert!(active.iter().all(|l| l.id != loan.id));

    let _ = client.delete_item(&item.id).await;
    let _ = client.delete_user(&user.id).await;
}
