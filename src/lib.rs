//! Build, validate and parse DMARC DNS TXT policy records.
//!
//! The crate is a pure codec: `DmarcRecord` holds the recognized policy
//! tags, validates every mutation, parses raw record text and serializes
//! back to canonical form. DNS publication and lookup are the caller's
//! responsibility.

mod parser;
mod record;
mod types;

pub use record::DmarcRecord;
pub use types::{AlignmentMode, Policy, PsdPolicy, ReportingOption, TestingMode};

use thiserror::Error;

/// Errors raised by record mutation and parsing.
///
/// All failures are immediate; a failing setter leaves its field unchanged
/// and a failing parse returns no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DmarcError {
    /// A value outside the field's allowed set.
    #[error("invalid {field} value: '{value}'")]
    Validation { field: &'static str, value: String },

    /// A rua=/ruf= report address without the mailto: scheme.
    #[error("{field} mailto address should start with \"mailto:\"")]
    Format { field: &'static str },

    /// Parse input without the required v= or p= tag.
    #[error("{0}")]
    MissingField(&'static str),

    /// An adkim=/aspf=/ro= short code outside the decode table.
    #[error("unhandled {field} code: '{value}'")]
    UnhandledValue { field: &'static str, value: String },
}
