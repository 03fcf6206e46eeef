//! SAFE note and term sheet routes

use super::companies::load_company;
use super::{COMPANY_STAFF, CREATE, READ, WRITE};
use crate::auth::AuthenticatedUser;
use crate::core::models::{CompanyMembership, Document, DocumentKind, Role};
use crate::server::middleware::{CompanyGuard, RouteRequirement};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, guard, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

const RECIPIENTS: &[Role] = &[Role::SafeRecipient, Role::TermSheetRecipient];

/// Upper bound of a discount, 100% in basis points
pub const MAX_DISCOUNT_BPS: i32 = 10_000;

/// Draft creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    /// Document kind
    pub kind: DocumentKind,
    /// Issuing company
    pub sender_company_id: Uuid,
    /// Investment amount in cents
    pub amount_cents: i64,
    /// Valuation cap in cents
    #[serde(default)]
    pub valuation_cap_cents: Option<i64>,
    /// Discount in basis points
    #[serde(default)]
    pub discount_bps: Option<i32>,
    /// Investing company, if known up front
    #[serde(default)]
    pub recipient_company_id: Option<Uuid>,
}

impl CreateDocumentRequest {
    fn validate(&self) -> Result<()> {
        if self.amount_cents <= 0 {
            return Err(GatewayError::validation("amountCents must be positive"));
        }
        if self.valuation_cap_cents.is_some_and(|cap| cap <= 0) {
            return Err(GatewayError::validation("valuationCapCents must be positive"));
        }
        if self
            .discount_bps
            .is_some_and(|bps| !(0..=MAX_DISCOUNT_BPS).contains(&bps))
        {
            return Err(GatewayError::validation(format!(
                "discountBps must be between 0 and {}",
                MAX_DISCOUNT_BPS
            )));
        }
        Ok(())
    }
}

/// Listing filter; exactly one side must be given
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    /// Company receiving the documents
    pub angel_company_id: Option<Uuid>,
    /// Company issuing the documents
    pub entrepreneur_company_id: Option<Uuid>,
}

/// Send request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDocumentRequest {
    /// Email of the investor
    pub recipient_email: String,
    /// Investing company, if the investor invests through one
    #[serde(default)]
    pub recipient_company_id: Option<Uuid>,
}

/// Register document routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/documents")
            .guard(guard::Post())
            .route(web::post().to(create_document))
            .wrap(CompanyGuard::new(RouteRequirement::company(COMPANY_STAFF, CREATE))),
    )
    .service(
        web::resource("/documents")
            .guard(guard::Get())
            .route(web::get().to(list_documents))
            .wrap(CompanyGuard::new(RouteRequirement::company(COMPANY_STAFF, READ))),
    )
    .service(
        web::resource("/documents/{document_id}")
            .route(web::get().to(get_document))
            .wrap(CompanyGuard::new(RouteRequirement::document(
                &[
                    Role::Owner,
                    Role::TeamMember,
                    Role::SafeRecipient,
                    Role::TermSheetRecipient,
                ],
                READ,
            ))),
    )
    .service(
        web::resource("/documents/{document_id}/send")
            .route(web::post().to(send_document))
            .wrap(CompanyGuard::new(RouteRequirement::document(COMPANY_STAFF, WRITE))),
    )
    .service(
        web::resource("/documents/{document_id}/cancel")
            .route(web::post().to(cancel_document))
            .wrap(CompanyGuard::new(RouteRequirement::document(COMPANY_STAFF, WRITE))),
    )
    .service(
        web::resource("/documents/{document_id}/sign")
            .route(web::post().to(sign_document))
            .wrap(CompanyGuard::new(RouteRequirement::document(RECIPIENTS, &[]))),
    )
    .service(
        web::resource("/documents/{document_id}/decline")
            .route(web::post().to(decline_document))
            .wrap(CompanyGuard::new(RouteRequirement::document(RECIPIENTS, &[]))),
    );
}

async fn load_document(state: &AppState, document_id: Uuid) -> Result<Document> {
    state
        .storage
        .documents()
        .get_document(document_id)
        .await?
        .ok_or_else(|| GatewayError::not_found(format!("Document {} not found", document_id)))
}

fn ensure_recipient(document: &Document, caller: AuthenticatedUser) -> Result<()> {
    if document.recipient_user_id != Some(caller.user_id) {
        return Err(GatewayError::forbidden("This document is addressed to another user"));
    }
    Ok(())
}

/// `POST /api/documents`
pub async fn create_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    request: web::Json<CreateDocumentRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    request.validate()?;

    let sender = load_company(&state, request.sender_company_id).await?;
    if let Some(recipient_company_id) = request.recipient_company_id {
        load_company(&state, recipient_company_id).await?;
    }

    let mut document = Document::draft(request.kind, sender.id(), request.amount_cents);
    document.valuation_cap_cents = request.valuation_cap_cents;
    document.discount_bps = request.discount_bps;
    document.recipient_company_id = request.recipient_company_id;
    state.storage.store().insert_document(&document).await?;

    info!(
        document_id = %document.id(),
        kind = %document.kind,
        company_id = %sender.id(),
        created_by = %caller.user_id,
        "Document drafted"
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(document)))
}

/// `GET /api/documents?angelCompanyId=..` or `?entrepreneurCompanyId=..`
pub async fn list_documents(
    state: web::Data<AppState>,
    query: web::Query<ListDocumentsQuery>,
) -> Result<HttpResponse> {
    let store = state.storage.store();

    let documents = match (query.angel_company_id, query.entrepreneur_company_id) {
        (Some(angel), None) => {
            load_company(&state, angel).await?;
            store.list_documents_received_by(angel).await?
        }
        (None, Some(entrepreneur)) => {
            load_company(&state, entrepreneur).await?;
            store.list_documents_sent_by(entrepreneur).await?
        }
        _ => {
            return Err(GatewayError::bad_request(
                "Specify exactly one of angelCompanyId or entrepreneurCompanyId",
            ));
        }
    };

    let count = documents.len();
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_meta(
        documents,
        serde_json::json!({ "count": count }),
    )))
}

/// `GET /api/documents/{document_id}`
///
/// Company staff see every document of the company; a recipient sees only
/// the documents addressed to them.
pub async fn get_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let document = load_document(&state, path.into_inner()).await?;

    let staff = state
        .evaluator
        .evaluate(
            Some(document.sender_company_id),
            caller.user_id,
            COMPANY_STAFF,
            READ,
        )
        .await?;
    if !staff {
        ensure_recipient(&document, caller)?;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(document)))
}

/// `POST /api/documents/{document_id}/send`
///
/// Records the recipient role on the sender company so the recipient can
/// read and answer the document.
pub async fn send_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
    request: web::Json<SendDocumentRequest>,
) -> Result<HttpResponse> {
    let mut document = load_document(&state, path.into_inner()).await?;
    let store = state.storage.store();

    let email = request.recipient_email.trim().to_lowercase();
    let recipient = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| GatewayError::not_found(format!("No user registered as {}", email)))?;

    if let Some(recipient_company_id) = request.recipient_company_id {
        load_company(&state, recipient_company_id).await?;
        document.recipient_company_id = Some(recipient_company_id);
    }

    document.send(recipient.id())?;
    store.update_document(&document).await?;

    let role = document.kind.recipient_role();
    let existing = state
        .storage
        .lookup()
        .get_membership(document.sender_company_id, recipient.id(), &[role])
        .await?;
    if existing.is_none() {
        store
            .insert_membership(&CompanyMembership::recipient(
                document.sender_company_id,
                recipient.id(),
                role,
            ))
            .await?;
    }

    info!(
        document_id = %document.id(),
        recipient_id = %recipient.id(),
        sent_by = %caller.user_id,
        "Document sent"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(document)))
}

/// `POST /api/documents/{document_id}/sign`
pub async fn sign_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let mut document = load_document(&state, path.into_inner()).await?;
    ensure_recipient(&document, caller)?;

    document.sign()?;
    state.storage.store().update_document(&document).await?;

    info!(document_id = %document.id(), "Document signed");
    Ok(HttpResponse::Ok().json(ApiResponse::success(document)))
}

/// `POST /api/documents/{document_id}/decline`
pub async fn decline_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let mut document = load_document(&state, path.into_inner()).await?;
    ensure_recipient(&document, caller)?;

    document.decline()?;
    state.storage.store().update_document(&document).await?;

    info!(document_id = %document.id(), "Document declined");
    Ok(HttpResponse::Ok().json(ApiResponse::success(document)))
}

/// `POST /api/documents/{document_id}/cancel`
pub async fn cancel_document(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let mut document = load_document(&state, path.into_inner()).await?;

    document.cancel()?;
    state.storage.store().update_document(&document).await?;

    info!(document_id = %document.id(), cancelled_by = %caller.user_id, "Document cancelled");
    Ok(HttpResponse::Ok().json(ApiResponse::success(document)))
}
