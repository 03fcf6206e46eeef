//! Data factories

use safenote_rs::core::models::{
    Company, CompanyMembership, Document, DocumentKind, InviteStatus, Permission, Role, User,
};
use safenote_rs::storage::Store;
use uuid::Uuid;

/// Insert a user with a placeholder password hash
pub async fn user(store: &dyn Store, email: &str) -> User {
    let user = User::new(email, None, "not-a-real-hash".to_string());
    store.insert_user(&user).await.expect("insert user");
    user
}

/// Insert a company owned by `owner_id`
pub async fn company(store: &dyn Store, name: &str, owner_id: Uuid) -> Company {
    let company = Company::new(name, owner_id);
    store.insert_company(&company).await.expect("insert company");
    company
}

/// Insert a team membership in the given state
pub async fn team_member(
    store: &dyn Store,
    company_id: Uuid,
    user_id: Uuid,
    permission: Option<Permission>,
    status: InviteStatus,
) -> CompanyMembership {
    let mut membership = CompanyMembership::invite(company_id, user_id, Permission::View);
    membership.permission = permission;
    membership.invite_status = Some(status);
    store
        .insert_membership(&membership)
        .await
        .expect("insert membership");
    membership
}

/// Insert a recipient membership
pub async fn recipient(
    store: &dyn Store,
    company_id: Uuid,
    user_id: Uuid,
    role: Role,
) -> CompanyMembership {
    let membership = CompanyMembership::recipient(company_id, user_id, role);
    store
        .insert_membership(&membership)
        .await
        .expect("insert membership");
    membership
}

/// Insert a draft SAFE note issued by `company_id`
pub async fn safe_note(store: &dyn Store, company_id: Uuid) -> Document {
    let document = Document::draft(DocumentKind::SafeNote, company_id, 2_500_000);
    store
        .insert_document(&document)
        .await
        .expect("insert document");
    document
}
