//! SAFE note and term sheet documents
//!
//! Both document kinds share one lifecycle:
//!
//! ```text
//! Draft --send--> Sent --sign----> Signed
//!   |               |--decline--> Declined
//!   '--cancel--> Cancelled <--cancel--'
//! ```
//!
//! `Signed`, `Declined` and `Cancelled` are terminal.

use super::{Metadata, Role};
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of financing document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Simple Agreement for Future Equity
    SafeNote,
    /// Term sheet
    TermSheet,
}

impl DocumentKind {
    /// Role granted to the user a document of this kind is sent to
    pub fn recipient_role(&self) -> Role {
        match self {
            DocumentKind::SafeNote => Role::SafeRecipient,
            DocumentKind::TermSheet => Role::TermSheetRecipient,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::SafeNote => write!(f, "safe_note"),
            DocumentKind::TermSheet => write!(f, "term_sheet"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "safe_note" => Ok(DocumentKind::SafeNote),
            "term_sheet" => Ok(DocumentKind::TermSheet),
            _ => Err(format!("Invalid document kind: {}", s)),
        }
    }
}

/// Document lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being prepared by the sender
    Draft,
    /// Delivered to the recipient
    Sent,
    /// Signed by the recipient
    Signed,
    /// Declined by the recipient
    Declined,
    /// Withdrawn by the sender
    Cancelled,
}

impl DocumentStatus {
    /// Whether no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DocumentStatus::Signed | DocumentStatus::Declined | DocumentStatus::Cancelled
        )
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "draft"),
            DocumentStatus::Sent => write!(f, "sent"),
            DocumentStatus::Signed => write!(f, "signed"),
            DocumentStatus::Declined => write!(f, "declined"),
            DocumentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(DocumentStatus::Draft),
            "sent" => Ok(DocumentStatus::Sent),
            "signed" => Ok(DocumentStatus::Signed),
            "declined" => Ok(DocumentStatus::Declined),
            "cancelled" => Ok(DocumentStatus::Cancelled),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// A SAFE note or term sheet issued by a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    #[serde(flatten)]
    pub metadata: Metadata,
    /// Document kind
    pub kind: DocumentKind,
    /// Current lifecycle status
    pub status: DocumentStatus,
    /// Issuing (entrepreneur) company
    pub sender_company_id: Uuid,
    /// Receiving (angel) company, if the investor invests through one
    pub recipient_company_id: Option<Uuid>,
    /// User the document is addressed to, set once sent
    pub recipient_user_id: Option<Uuid>,
    /// Investment amount in cents
    pub amount_cents: i64,
    /// Valuation cap in cents
    pub valuation_cap_cents: Option<i64>,
    /// Discount in basis points
    pub discount_bps: Option<i32>,
}

impl Document {
    /// Create a draft document
    pub fn draft(kind: DocumentKind, sender_company_id: Uuid, amount_cents: i64) -> Self {
        Self {
            metadata: Metadata::new(),
            kind,
            status: DocumentStatus::Draft,
            sender_company_id,
            recipient_company_id: None,
            recipient_user_id: None,
            amount_cents,
            valuation_cap_cents: None,
            discount_bps: None,
        }
    }

    /// Document ID
    pub fn id(&self) -> Uuid {
        self.metadata.id
    }

    /// Deliver a draft to `recipient_user_id`
    pub fn send(&mut self, recipient_user_id: Uuid) -> Result<()> {
        self.transition(DocumentStatus::Sent)?;
        self.recipient_user_id = Some(recipient_user_id);
        Ok(())
    }

    /// Record the recipient's signature
    pub fn sign(&mut self) -> Result<()> {
        self.transition(DocumentStatus::Signed)
    }

    /// Record the recipient's refusal
    pub fn decline(&mut self) -> Result<()> {
        self.transition(DocumentStatus::Declined)
    }

    /// Withdraw the document
    pub fn cancel(&mut self) -> Result<()> {
        self.transition(DocumentStatus::Cancelled)
    }

    fn transition(&mut self, next: DocumentStatus) -> Result<()> {
        let allowed = matches!(
            (self.status, next),
            (DocumentStatus::Draft, DocumentStatus::Sent)
                | (DocumentStatus::Sent, DocumentStatus::Signed)
                | (DocumentStatus::Sent, DocumentStatus::Declined)
                | (DocumentStatus::Draft, DocumentStatus::Cancelled)
                | (DocumentStatus::Sent, DocumentStatus::Cancelled)
        );

        if !allowed {
            return Err(GatewayError::conflict(format!(
                "Cannot move {} from {} to {}",
                self.kind, self.status, next
            )));
        }

        self.status = next;
        self.metadata.touch();
        Ok(())
    }
}
