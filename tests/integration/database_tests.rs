//! SeaORM storage tests against in-memory SQLite

use crate::common::database::TestDatabase;
use crate::common::fixtures;
use safenote_rs::auth::access::{CompanyMembershipLookup, DocumentLookup};
use safenote_rs::core::models::{DocumentStatus, InviteStatus, Permission, Role, User};
use safenote_rs::storage::Store;
use safenote_rs::GatewayError;
use uuid::Uuid;

#[tokio::test]
async fn test_database_health_check() {
    let db = TestDatabase::new().await;
    assert!(db.db().health_check().await.is_ok());
}

#[tokio::test]
async fn test_user_round_trip_and_duplicate_email() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let user = fixtures::user(store.as_ref(), "founder@example.com").await;

    let found = store
        .find_user_by_email("founder@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id(), user.id());
    assert!(found.last_login_at.is_none());

    store.update_user_last_login(user.id()).await.unwrap();
    let found = store.find_user_by_id(user.id()).await.unwrap().unwrap();
    assert!(found.last_login_at.is_some());

    let duplicate = User::new("founder@example.com", None, "hash".to_string());
    let err = store.insert_user(&duplicate).await.unwrap_err();
    assert!(matches!(err, GatewayError::Conflict(_)));
}

#[tokio::test]
async fn test_company_lookup() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let owner = fixtures::user(store.as_ref(), "owner@example.com").await;
    let company = fixtures::company(store.as_ref(), "Acme", owner.id()).await;

    let found = store.get_company_by_id(company.id()).await.unwrap().unwrap();
    assert_eq!(found.name, "Acme");
    assert!(found.is_owned_by(owner.id()));

    assert!(store.get_company_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_membership_filters_by_role() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let owner = fixtures::user(store.as_ref(), "owner@example.com").await;
    let investor = fixtures::user(store.as_ref(), "investor@example.com").await;
    let company = fixtures::company(store.as_ref(), "Acme", owner.id()).await;
    fixtures::recipient(store.as_ref(), company.id(), investor.id(), Role::SafeRecipient).await;

    let safe = store
        .get_membership(company.id(), investor.id(), &[Role::SafeRecipient])
        .await
        .unwrap();
    assert_eq!(safe.map(|m| m.role), Some(Role::SafeRecipient));

    let team = store
        .get_membership(company.id(), investor.id(), &[Role::TeamMember])
        .await
        .unwrap();
    assert!(team.is_none());

    let any = store
        .get_membership(
            company.id(),
            investor.id(),
            &[Role::TeamMember, Role::SafeRecipient],
        )
        .await
        .unwrap();
    assert!(any.is_some());
}

#[tokio::test]
async fn test_membership_update_and_listing() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let owner = fixtures::user(store.as_ref(), "owner@example.com").await;
    let member = fixtures::user(store.as_ref(), "member@example.com").await;
    let company = fixtures::company(store.as_ref(), "Acme", owner.id()).await;
    let mut membership = fixtures::team_member(
        store.as_ref(),
        company.id(),
        member.id(),
        Some(Permission::View),
        InviteStatus::Pending,
    )
    .await;

    membership.invite_status = Some(InviteStatus::Accepted);
    membership.permission = Some(Permission::Create);
    store.update_membership(&membership).await.unwrap();

    let found = store
        .find_membership_by_id(membership.metadata.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.permission, Some(Permission::Create));
    assert!(found.is_accepted());

    let members = store.list_memberships(company.id()).await.unwrap();
    assert_eq!(members.len(), 1);

    let companies = store.list_companies_for_user(member.id()).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].id(), company.id());
}

#[tokio::test]
async fn test_pending_member_does_not_list_company() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let owner = fixtures::user(store.as_ref(), "owner@example.com").await;
    let member = fixtures::user(store.as_ref(), "member@example.com").await;
    let company = fixtures::company(store.as_ref(), "Acme", owner.id()).await;
    fixtures::team_member(
        store.as_ref(),
        company.id(),
        member.id(),
        Some(Permission::View),
        InviteStatus::Pending,
    )
    .await;

    assert!(store.list_companies_for_user(member.id()).await.unwrap().is_empty());
    assert_eq!(store.list_companies_for_user(owner.id()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_missing_membership_is_not_found() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let membership = safenote_rs::core::models::CompanyMembership::invite(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Permission::View,
    );
    let err = store.update_membership(&membership).await.unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn test_document_lifecycle_persists() {
    let db = TestDatabase::new().await;
    let store = db.db_arc();

    let founder = fixtures::user(store.as_ref(), "founder@example.com").await;
    let angel = fixtures::user(store.as_ref(), "angel@example.com").await;
    let startup = fixtures::company(store.as_ref(), "Startup", founder.id()).await;
    let fund = fixtures::company(store.as_ref(), "Fund", angel.id()).await;

    let mut document = fixtures::safe_note(store.as_ref(), startup.id()).await;
    document.recipient_company_id = Some(fund.id());
    document.send(angel.id()).unwrap();
    store.update_document(&document).await.unwrap();

    let found = store.get_document(document.id()).await.unwrap().unwrap();
    assert_eq!(found.status, DocumentStatus::Sent);
    assert_eq!(found.recipient_user_id, Some(angel.id()));

    let sent = store.list_documents_sent_by(startup.id()).await.unwrap();
    assert_eq!(sent.len(), 1);
    let received = store.list_documents_received_by(fund.id()).await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(store.list_documents_received_by(startup.id()).await.unwrap().is_empty());

    assert!(store.get_document(Uuid::new_v4()).await.unwrap().is_none());
}
