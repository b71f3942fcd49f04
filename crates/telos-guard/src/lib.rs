//! # TELOS Guard
//!
//! PII scrubbing for text that is about to leave the building.
//!
//! Everything a user uploads ends up in a prompt sent to a third-party LLM.
//! TELOS Guard sits in front of that hand-off and replaces phone numbers,
//! email addresses, SSNs, card numbers, street addresses, tax IDs and
//! passport numbers with fixed placeholder tokens, then reports what it
//! removed.
//!
//! ## Quick Start
//!
//! ```rust
//! use telos_guard::{format_summary, Guard};
//!
//! let guard = Guard::default();
//! let result = guard.scrub("My SSN is 123-45-6789, call me at 555-123-4567");
//!
//! assert!(!result.cleaned.contains("123-45-6789"));
//! assert_eq!(result.total_removed, 2);
//! assert_eq!(
//!     format_summary(&result.findings),
//!     "Found and removed: 1 phone number, 1 SSN"
//! );
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Extracted    │ ──► │ Guard            │ ──► │ Prompt layer │
//! │ text         │     │ ┌──────────────┐ │     └──────────────┘
//! └──────────────┘     │ │ PII scrubber │ │
//!                      │ └──────────────┘ │ ──► summary line
//!                      │ ┌──────────────┐ │
//!                      │ │ Audit logger │ │ ──► tracing / JSONL
//!                      │ └──────────────┘ │
//!                      └──────────────────┘
//! ```

pub mod audit;
pub mod config;
pub mod guard;
pub mod pii;
pub mod report;
pub mod types;

pub use config::{AuditConfig, GuardConfig};
pub use guard::{Guard, GuardBuilder};
pub use pii::{scrub, PiiScrubber};
pub use report::format_summary;
pub use types::*;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::GuardConfig;
    pub use crate::guard::Guard;
    pub use crate::pii::scrub;
    pub use crate::report::format_summary;
    pub use crate::types::*;
}
