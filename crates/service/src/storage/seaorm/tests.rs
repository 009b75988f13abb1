use chrono::Utc;
use uuid::Uuid;

use super::SeaOrmStore;
use crate::auth::domain::NewUser;
use crate::auth::repository::UserRepository;
use crate::booking::domain::{BookingStatus, NewBooking, PaymentStatus};
use crate::booking::repository::BookingRepository;
use crate::catalog::domain::{ListingFilter, NewListing};
use crate::catalog::repository::ListingRepository;
use crate::category::CategoryRepository;
use crate::errors::ServiceError;
use crate::messaging::domain::NewMessage;
use crate::messaging::repository::MessageRepository;
use crate::policy::Role;
use crate::test_support::postgres_store;

async fn user(store: &SeaOrmStore, role: Role) -> anyhow::Result<Uuid> {
    let email = format!("{}@store-test.io", Uuid::new_v4());
    let u = store
        .create_user(NewUser { name: "Store Test".into(), email, password_hash: "x".into(), role, is_verified: false })
        .await?;
    Ok(u.id)
}

fn listing(provider_id: Uuid, title: &str, location: &str) -> NewListing {
    NewListing {
        provider_id,
        title: title.into(),
        description: "store test".into(),
        category: "Test".into(),
        price: 25.0,
        location: location.into(),
        image: String::new(),
    }
}

#[tokio::test]
async fn search_is_case_insensitive_and_escapes_wildcards() -> anyhow::Result<()> {
    let Some(store) = postgres_store().await? else { return Ok(()) };
    let provider = user(&store, Role::Provider).await?;
    let marker = Uuid::new_v4().simple().to_string();
    let hit = store.create_listing(listing(provider, &format!("PLUMB {marker}"), "Kochi")).await?;
    store.create_listing(listing(provider, &format!("tutor {marker}"), "Kochi")).await?;

    let found = store
        .search_listings(&ListingFilter { search: Some(format!("plumb {marker}")), location: Some("KOCHI".into()) })
        .await?;
    assert_eq!(found.iter().map(|l| l.id).collect::<Vec<_>>(), vec![hit.id]);

    let wildcard = store.search_listings(&ListingFilter { search: Some(format!("%{marker}")), location: None }).await?;
    assert!(wildcard.is_empty());

    store.delete_user(provider).await?;
    Ok(())
}

#[tokio::test]
async fn booking_state_and_cascade() -> anyhow::Result<()> {
    let Some(store) = postgres_store().await? else { return Ok(()) };
    let provider = user(&store, Role::Provider).await?;
    let customer = user(&store, Role::Customer).await?;
    let l = store.create_listing(listing(provider, "Cascade", "Goa")).await?;
    let b = store.create_booking(NewBooking { customer_id: customer, service_id: l.id, date: Utc::now() }).await?;
    assert_eq!(b.status, BookingStatus::Pending);

    let paid = store.save_booking_state(b.id, BookingStatus::Confirmed, PaymentStatus::Paid).await?;
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    assert!(store.delete_user(provider).await?);
    assert!(store.find_listing(l.id).await?.is_none());
    assert!(store.find_booking(b.id).await?.is_none());
    store.delete_user(customer).await?;
    Ok(())
}

#[tokio::test]
async fn toggle_verified_flips_flag_only() -> anyhow::Result<()> {
    let Some(store) = postgres_store().await? else { return Ok(()) };
    let id = user(&store, Role::Customer).await?;
    let before = store.find_user(id).await?.expect("user");
    let after = store.toggle_verified(id).await?.expect("user");
    assert_eq!(after.is_verified, !before.is_verified);
    assert_eq!((after.name, after.email, after.role), (before.name, before.email, before.role));
    store.delete_user(id).await?;
    Ok(())
}

#[tokio::test]
async fn message_ordering() -> anyhow::Result<()> {
    let Some(store) = postgres_store().await? else { return Ok(()) };
    let a = user(&store, Role::Customer).await?;
    let b = user(&store, Role::Provider).await?;
    let t0 = Utc::now();
    for (i, content) in ["one", "two"].into_iter().enumerate() {
        let created_at = t0 + chrono::Duration::seconds(i as i64);
        store.create_message(NewMessage { sender_id: a, recipient_id: b, content: content.into(), created_at }).await?;
    }
    let thread: Vec<_> = store.messages_between(b, a).await?.into_iter().map(|m| m.content).collect();
    assert_eq!(thread, ["one", "two"]);
    let newest: Vec<_> = store.messages_involving(a).await?.into_iter().map(|m| m.content).collect();
    assert_eq!(newest, ["two", "one"]);
    store.delete_user(a).await?;
    store.delete_user(b).await?;
    Ok(())
}

#[tokio::test]
async fn concurrent_duplicates_are_conflicts() -> anyhow::Result<()> {
    let Some(store) = postgres_store().await? else { return Ok(()) };
    let email = format!("{}@store-test.io", Uuid::new_v4());
    let new_user = || NewUser {
        name: "Racer".into(),
        email: email.clone(),
        password_hash: "x".into(),
        role: Role::Customer,
        is_verified: false,
    };
    let (a, b) = tokio::join!(store.create_user(new_user()), store.create_user(new_user()));
    let (winner, loser) = if a.is_ok() { (a, b) } else { (b, a) };
    let winner = winner?;
    assert!(
        matches!(loser, Err(ServiceError::Conflict(_)) | Err(ServiceError::Model(models::errors::ModelError::Conflict(_)))),
        "{loser:?}"
    );

    let name = format!("cat-{}", Uuid::new_v4());
    let (a, b) = tokio::join!(store.create_category(&name), store.create_category(&name));
    let (winner_cat, loser) = if a.is_ok() { (a, b) } else { (b, a) };
    let winner_cat = winner_cat?;
    assert!(
        matches!(loser, Err(ServiceError::Conflict(_)) | Err(ServiceError::Model(models::errors::ModelError::Conflict(_)))),
        "{loser:?}"
    );

    store.delete_category(winner_cat.id).await?;
    store.delete_user(winner.id).await?;
    Ok(())
}
