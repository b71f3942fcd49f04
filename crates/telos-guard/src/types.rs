//! Core types for TELOS Guard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Categories of personally identifiable information the scrubber removes.
///
/// Declaration order is the processing order: detection, replacement and the
/// summary string all walk [`PiiCategory::ALL`] front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PiiCategory {
    /// Phone number
    Phone,
    /// Email address
    Email,
    /// US Social Security Number
    Ssn,
    /// Payment card number
    CreditCard,
    /// Street address
    Address,
    /// Employer identification number
    TaxId,
    /// Passport number
    Passport,
}

impl PiiCategory {
    /// Every category, in processing order
    pub const ALL: [PiiCategory; 7] = [
        PiiCategory::Phone,
        PiiCategory::Email,
        PiiCategory::Ssn,
        PiiCategory::CreditCard,
        PiiCategory::Address,
        PiiCategory::TaxId,
        PiiCategory::Passport,
    ];

    /// Placeholder substituted for every match of this category.
    pub fn token(self) -> &'static str {
        match self {
            PiiCategory::Phone => "[PHONE_REMOVED]",
            PiiCategory::Email => "[EMAIL_REMOVED]",
            PiiCategory::Ssn => "[SSN_REMOVED]",
            PiiCategory::CreditCard => "[CREDIT_CARD_REMOVED]",
            PiiCategory::Address => "[ADDRESS_REMOVED]",
            PiiCategory::TaxId => "[TAX_ID_REMOVED]",
            PiiCategory::Passport => "[PASSPORT_REMOVED]",
        }
    }

    /// Human label for a single finding
    pub fn label(self) -> &'static str {
        match self {
            PiiCategory::Phone => "phone number",
            PiiCategory::Email => "email address",
            PiiCategory::Ssn => "SSN",
            PiiCategory::CreditCard => "credit card number",
            PiiCategory::Address => "street address",
            PiiCategory::TaxId => "tax ID",
            PiiCategory::Passport => "passport number",
        }
    }

    /// Human label for two or more findings
    pub fn plural_label(self) -> &'static str {
        match self {
            PiiCategory::Phone => "phone numbers",
            PiiCategory::Email => "email addresses",
            PiiCategory::Ssn => "SSNs",
            PiiCategory::CreditCard => "credit card numbers",
            PiiCategory::Address => "street addresses",
            PiiCategory::TaxId => "tax IDs",
            PiiCategory::Passport => "passport numbers",
        }
    }

    /// Wire name, as used by the UI layer
    pub fn as_str(self) -> &'static str {
        match self {
            PiiCategory::Phone => "phone",
            PiiCategory::Email => "email",
            PiiCategory::Ssn => "ssn",
            PiiCategory::CreditCard => "creditCard",
            PiiCategory::Address => "address",
            PiiCategory::TaxId => "taxId",
            PiiCategory::Passport => "passport",
        }
    }

    /// Position in [`PiiCategory::ALL`]
    pub fn position(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for PiiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many distinct values of one category were found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiFinding {
    /// Category of the finding
    #[serde(rename = "type")]
    pub category: PiiCategory,
    /// Number of distinct matched substrings (not occurrences)
    pub count: usize,
}

impl PiiFinding {
    pub fn new(category: PiiCategory, count: usize) -> Self {
        Self { category, count }
    }
}

/// Outcome of scrubbing a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubResult {
    /// Text with every match replaced by its category token
    pub cleaned: String,
    /// One entry per category that matched, in category order
    pub findings: Vec<PiiFinding>,
    /// Sum of all finding counts
    pub total_removed: usize,
}

impl ScrubResult {
    /// A result for text that contained nothing to remove
    pub fn clean(text: impl Into<String>) -> Self {
        Self {
            cleaned: text.into(),
            findings: Vec::new(),
            total_removed: 0,
        }
    }

    /// Check if anything was removed
    pub fn is_modified(&self) -> bool {
        self.total_removed > 0
    }

    /// Count recorded for a category, zero when it did not match
    pub fn count_for(&self, category: PiiCategory) -> usize {
        self.findings
            .iter()
            .find(|f| f.category == category)
            .map(|f| f.count)
            .unwrap_or(0)
    }
}

/// Distinct values matched for one category.
///
/// Only ever handed to the audit logger, which hashes them; it is not part of
/// any public result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiMatch {
    pub category: PiiCategory,
    pub values: Vec<String>,
}

/// Request context for guard operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardContext {
    /// Unique request ID
    pub request_id: Uuid,
    /// User identifier (optional)
    pub user_id: Option<String>,
    /// Session identifier (optional)
    pub session_id: Option<String>,
    /// Name of the uploaded file, when the text came from one
    pub source: Option<String>,
    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Default for GuardContext {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            user_id: None,
            session_id: None,
            source: None,
            timestamp: Utc::now(),
        }
    }
}

impl GuardContext {
    /// Create a new context with a fresh request ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user ID
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the source document name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Request context
    pub context: GuardContext,
    /// BLAKE3 hash of the scrubbed input
    pub content_hash: String,
    /// Hashes of the distinct values removed, per category
    pub removed: Vec<AuditRemoval>,
    /// Sum of all finding counts
    pub total_removed: usize,
    /// Processing time in microseconds
    pub processing_time_us: u64,
}

/// One category's contribution to an audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRemoval {
    pub category: PiiCategory,
    pub value_hashes: Vec<String>,
}
