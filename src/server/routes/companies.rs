//! Company and team membership routes

use super::{COMPANY_STAFF, CREATE, READ};
use crate::auth::AuthenticatedUser;
use crate::core::models::{Company, CompanyMembership, InviteStatus, Permission, Role};
use crate::server::middleware::{CompanyGuard, RouteRequirement};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, guard, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Company creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompanyRequest {
    /// Legal name
    pub name: String,
}

/// Team invitation request
#[derive(Debug, Clone, Deserialize)]
pub struct InviteMemberRequest {
    /// Email of an existing user
    pub email: String,
    /// Tier granted once the invitation is accepted
    pub permission: Permission,
}

/// Permission change request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMemberRequest {
    /// New tier
    pub permission: Permission,
}

/// Register company routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/companies")
            .route(web::get().to(list_companies))
            .route(web::post().to(create_company)),
    )
    .service(
        web::resource("/companies/{company_id}")
            .route(web::get().to(get_company))
            .wrap(CompanyGuard::new(RouteRequirement::company(COMPANY_STAFF, READ))),
    )
    .service(
        web::resource("/companies/{company_id}/members")
            .guard(guard::Get())
            .route(web::get().to(list_members))
            .wrap(CompanyGuard::new(RouteRequirement::company(COMPANY_STAFF, READ))),
    )
    .service(
        web::resource("/companies/{company_id}/members")
            .guard(guard::Post())
            .route(web::post().to(invite_member))
            .wrap(CompanyGuard::new(RouteRequirement::company(COMPANY_STAFF, CREATE))),
    )
    .service(
        web::resource("/companies/{company_id}/members/{member_id}")
            .route(web::patch().to(update_member))
            .wrap(CompanyGuard::new(RouteRequirement::company(&[Role::Owner], &[]))),
    );
}

pub(crate) async fn load_company(state: &AppState, company_id: Uuid) -> Result<Company> {
    state
        .storage
        .lookup()
        .get_company_by_id(company_id)
        .await?
        .ok_or_else(|| GatewayError::not_found(format!("Company {} not found", company_id)))
}

/// `POST /api/companies`
pub async fn create_company(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    request: web::Json<CreateCompanyRequest>,
) -> Result<HttpResponse> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(GatewayError::validation("Company name cannot be empty"));
    }

    let company = Company::new(name, caller.user_id);
    state.storage.store().insert_company(&company).await?;

    info!(company_id = %company.id(), owner_id = %caller.user_id, "Company created");
    Ok(HttpResponse::Created().json(ApiResponse::success(company)))
}

/// `GET /api/companies`
pub async fn list_companies(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
) -> Result<HttpResponse> {
    let companies = state
        .storage
        .store()
        .list_companies_for_user(caller.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(companies)))
}

/// `GET /api/companies/{company_id}`
pub async fn get_company(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let company = load_company(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(company)))
}

/// `GET /api/companies/{company_id}/members`
pub async fn list_members(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let company = load_company(&state, path.into_inner()).await?;
    let members = state.storage.store().list_memberships(company.id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(members)))
}

/// `POST /api/companies/{company_id}/members`
///
/// A previously declined invitation is reopened as pending.
pub async fn invite_member(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<InviteMemberRequest>,
) -> Result<HttpResponse> {
    let company = load_company(&state, path.into_inner()).await?;
    let store = state.storage.store();

    let email = request.email.trim().to_lowercase();
    let invitee = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| GatewayError::not_found(format!("No user registered as {}", email)))?;

    if company.is_owned_by(invitee.id()) {
        return Err(GatewayError::conflict("The owner cannot be invited to their own company"));
    }

    let existing = state
        .storage
        .lookup()
        .get_membership(company.id(), invitee.id(), &[Role::TeamMember])
        .await?;

    let response = match existing {
        Some(mut membership) if membership.is_declined() => {
            membership.permission = Some(request.permission);
            membership.invite_status = Some(InviteStatus::Pending);
            membership.metadata.touch();
            store.update_membership(&membership).await?;
            HttpResponse::Ok().json(ApiResponse::success(membership))
        }
        Some(_) => {
            return Err(GatewayError::conflict(format!(
                "{} is already invited to this company",
                email
            )));
        }
        None => {
            let membership =
                CompanyMembership::invite(company.id(), invitee.id(), request.permission);
            store.insert_membership(&membership).await?;
            HttpResponse::Created().json(ApiResponse::success(membership))
        }
    };

    info!(
        company_id = %company.id(),
        invitee_id = %invitee.id(),
        invited_by = %caller.user_id,
        permission = %request.permission,
        "Team member invited"
    );
    Ok(response)
}

/// `PATCH /api/companies/{company_id}/members/{member_id}`
pub async fn update_member(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse> {
    let (company_id, member_id) = path.into_inner();
    let company = load_company(&state, company_id).await?;
    let store = state.storage.store();

    let mut membership = store
        .find_membership_by_id(member_id)
        .await?
        .filter(|m| m.company_id == company.id())
        .ok_or_else(|| GatewayError::not_found(format!("Member {} not found", member_id)))?;

    if membership.role != Role::TeamMember {
        return Err(GatewayError::conflict("Only team members carry a permission"));
    }
    if !membership.is_accepted() {
        return Err(GatewayError::conflict(
            "The invitation has not been accepted yet",
        ));
    }

    membership.permission = Some(request.permission);
    membership.metadata.touch();
    store.update_membership(&membership).await?;

    info!(
        company_id = %company.id(),
        member_id = %member_id,
        permission = %request.permission,
        "Member permission changed"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(membership)))
}
