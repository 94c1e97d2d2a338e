use chrono::{DateTime, Utc};
use thiserror::Error;

/// Terminal domain failures. None of these are retried internally; the HTTP
/// boundary maps them onto the uniform error envelope.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Carrier '{carrier_id}' not found")]
    CarrierNotFound { carrier_id: String },
    #[error("Quote '{quote_id}' not found")]
    QuoteNotFound { quote_id: String },
    #[error("Quote has expired and is no longer bindable")]
    QuoteExpired { quote_id: String, expired_at: DateTime<Utc> },
    #[error("Policy '{policy_id}' not found")]
    PolicyNotFound { policy_id: String },
}

impl DomainError {
    /// Stable machine-readable code, part of the wire contract.
    pub fn code(&self) -> &'static str {
        match self {
            Self::CarrierNotFound { .. } => "CARRIER_NOT_FOUND",
            Self::QuoteNotFound { .. } => "NOT_FOUND",
            Self::QuoteExpired { .. } => "QUOTE_EXPIRED",
            Self::PolicyNotFound { .. } => "POLICY_NOT_FOUND",
        }
    }
}
