//! Integration tests for the service catalog repository: CRUD, soft
//! delete, and catalog visibility.

use rust_decimal::Decimal;
use sqlx::PgPool;

use hostdesk_db::models::service::{CreateService, UpdateService};
use hostdesk_db::models::status::ServiceKind;
use hostdesk_db::repositories::ServiceRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_service(name: &str, price: i64) -> CreateService {
    CreateService {
        name: name.to_string(),
        price: Decimal::from(price),
        description: Some(format!("{name} description")),
        kind: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_defaults(pool: PgPool) {
    let service = ServiceRepo::create(&pool, &new_service("Web hosting", 500))
        .await
        .unwrap();

    assert_eq!(service.name, "Web hosting");
    assert_eq!(service.price, Decimal::from(500));
    assert_eq!(service.kind, ServiceKind::OneTime); // default
    assert!(service.is_active);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_active_sorted_by_name(pool: PgPool) {
    ServiceRepo::create(&pool, &new_service("Zeta plan", 10))
        .await
        .unwrap();
    ServiceRepo::create(&pool, &new_service("Alpha plan", 20))
        .await
        .unwrap();

    let services = ServiceRepo::list_active(&pool).await.unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(services[0].name, "Alpha plan");
    assert_eq!(services[1].name, "Zeta plan");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_partial(pool: PgPool) {
    let service = ServiceRepo::create(&pool, &new_service("VPS", 300))
        .await
        .unwrap();

    let updated = ServiceRepo::update(
        &pool,
        service.id,
        &UpdateService {
            name: None,
            price: Some(Decimal::from(350)),
            description: None,
            kind: Some(ServiceKind::Monthly),
            is_active: None,
        },
    )
    .await
    .unwrap()
    .expect("service exists");

    // Untouched fields keep their values.
    assert_eq!(updated.name, "VPS");
    assert_eq!(updated.price, Decimal::from(350));
    assert_eq!(updated.kind, ServiceKind::Monthly);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_returns_none(pool: PgPool) {
    let result = ServiceRepo::update(
        &pool,
        9999,
        &UpdateService {
            name: Some("ghost".to_string()),
            price: None,
            description: None,
            kind: None,
            is_active: None,
        },
    )
    .await
    .unwrap();

    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_delete_hides_from_catalog(pool: PgPool) {
    let service = ServiceRepo::create(&pool, &new_service("Legacy plan", 100))
        .await
        .unwrap();

    let deleted = ServiceRepo::soft_delete(&pool, service.id).await.unwrap();
    assert!(deleted);

    // Gone from the catalog...
    let services = ServiceRepo::list_active(&pool).await.unwrap();
    assert!(services.is_empty());

    // ...but the row still exists for historical invoices.
    let row = ServiceRepo::find_by_id(&pool, service.id).await.unwrap();
    assert!(matches!(row, Some(s) if !s.is_active));

    let active = ServiceRepo::find_active_by_id(&pool, service.id)
        .await
        .unwrap();
    assert!(active.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_soft_delete_missing_returns_false(pool: PgPool) {
    let deleted = ServiceRepo::soft_delete(&pool, 9999).await.unwrap();
    assert!(!deleted);
}
