//! Invitation answers
//!
//! These routes are scoped to the caller rather than to a company: only the
//! invited user can answer, and only while the invitation is pending.

use crate::auth::AuthenticatedUser;
use crate::core::models::{InviteStatus, Role};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use tracing::info;
use uuid::Uuid;

/// Register invitation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/invites/{member_id}/accept", web::post().to(accept_invite))
        .route("/invites/{member_id}/decline", web::post().to(decline_invite));
}

/// `POST /api/invites/{member_id}/accept`
pub async fn accept_invite(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    answer(&state, caller, path.into_inner(), InviteStatus::Accepted).await
}

/// `POST /api/invites/{member_id}/decline`
pub async fn decline_invite(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    answer(&state, caller, path.into_inner(), InviteStatus::Declined).await
}

async fn answer(
    state: &AppState,
    caller: AuthenticatedUser,
    member_id: Uuid,
    status: InviteStatus,
) -> Result<HttpResponse> {
    let store = state.storage.store();

    let mut membership = store
        .find_membership_by_id(member_id)
        .await?
        .filter(|m| m.role == Role::TeamMember)
        .ok_or_else(|| GatewayError::not_found(format!("Invitation {} not found", member_id)))?;

    if membership.user_id != caller.user_id {
        return Err(GatewayError::forbidden("This invitation is addressed to another user"));
    }
    if membership.invite_status != Some(InviteStatus::Pending) {
        return Err(GatewayError::conflict("The invitation has already been answered"));
    }

    membership.invite_status = Some(status);
    membership.metadata.touch();
    store.update_membership(&membership).await?;

    info!(
        company_id = %membership.company_id,
        user_id = %caller.user_id,
        status = %status,
        "Invitation answered"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(membership)))
}
