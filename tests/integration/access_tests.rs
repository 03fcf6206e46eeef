//! Access evaluation over SQLite-backed lookups

use crate::common::database::TestDatabase;
use crate::common::fixtures;
use safenote_rs::auth::access::{AccessEvaluator, AccessReason, AccessRequest};
use safenote_rs::core::models::{InviteStatus, Permission, Role};
use uuid::Uuid;

const STAFF: &[Role] = &[Role::Owner, Role::TeamMember];

async fn setup() -> (TestDatabase, AccessEvaluator) {
    let db = TestDatabase::new().await;
    let evaluator = AccessEvaluator::new(db.db_arc());
    (db, evaluator)
}

async fn allowed(
    evaluator: &AccessEvaluator,
    company_id: Uuid,
    user_id: Uuid,
    permissions: &[Permission],
) -> bool {
    evaluator
        .evaluate(Some(company_id), user_id, STAFF, permissions)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_owner_and_team_member_tiers() {
    let (db, evaluator) = setup().await;
    let store = db.db();

    let owner = fixtures::user(store, "owner@example.com").await;
    let editor = fixtures::user(store, "editor@example.com").await;
    let company = fixtures::company(store, "Acme", owner.id()).await;
    fixtures::team_member(
        store,
        company.id(),
        editor.id(),
        Some(Permission::Edit),
        InviteStatus::Accepted,
    )
    .await;

    assert!(allowed(&evaluator, company.id(), owner.id(), &[Permission::Create]).await);
    assert!(allowed(&evaluator, company.id(), editor.id(), &[Permission::Edit]).await);
    assert!(allowed(&evaluator, company.id(), editor.id(), &[Permission::View]).await);
    assert!(!allowed(&evaluator, company.id(), editor.id(), &[Permission::Create]).await);
}

#[tokio::test]
async fn test_declined_member_is_denied_unscoped_route() {
    let (db, evaluator) = setup().await;
    let store = db.db();

    let owner = fixtures::user(store, "owner@example.com").await;
    let member = fixtures::user(store, "member@example.com").await;
    let company = fixtures::company(store, "Acme", owner.id()).await;
    fixtures::team_member(
        store,
        company.id(),
        member.id(),
        Some(Permission::Create),
        InviteStatus::Declined,
    )
    .await;

    let decision = evaluator
        .check(&AccessRequest {
            company_id: Some(company.id()),
            user_id: member.id(),
            required_roles: vec![],
            required_permissions: vec![],
        })
        .await
        .unwrap();
    assert!(!decision.granted);
    assert_eq!(decision.reason, AccessReason::InviteDeclined);

    let decision = evaluator
        .check(&AccessRequest {
            company_id: Some(company.id()),
            user_id: owner.id(),
            required_roles: vec![],
            required_permissions: vec![],
        })
        .await
        .unwrap();
    assert!(decision.granted);
    assert_eq!(decision.reason, AccessReason::NoRoleRequired);
}

#[tokio::test]
async fn test_recipient_roles_are_kind_specific() {
    let (db, evaluator) = setup().await;
    let store = db.db();

    let owner = fixtures::user(store, "owner@example.com").await;
    let angel = fixtures::user(store, "angel@example.com").await;
    let company = fixtures::company(store, "Acme", owner.id()).await;
    fixtures::recipient(store, company.id(), angel.id(), Role::TermSheetRecipient).await;

    assert!(
        evaluator
            .evaluate(Some(company.id()), angel.id(), &[Role::TermSheetRecipient], &[])
            .await
            .unwrap()
    );
    assert!(
        !evaluator
            .evaluate(Some(company.id()), angel.id(), &[Role::SafeRecipient], &[])
            .await
            .unwrap()
    );
    assert!(
        !evaluator
            .evaluate(Some(company.id()), angel.id(), STAFF, &[Permission::View])
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_missing_company_is_allowed() {
    let (_db, evaluator) = setup().await;

    let decision = evaluator
        .check(&AccessRequest {
            company_id: Some(Uuid::new_v4()),
            user_id: Uuid::new_v4(),
            required_roles: vec![Role::Owner],
            required_permissions: vec![],
        })
        .await
        .unwrap();
    assert!(decision.granted);
    assert_eq!(decision.reason, AccessReason::CompanyNotFound);
}
