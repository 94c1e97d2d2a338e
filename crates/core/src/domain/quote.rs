//! Quote response shapes and the records the quote store keeps for binding.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::request::QuoteRequest;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    Quoted,
    Declined,
}

/// A deductible is either a single amount or a per-peril map (auto).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Deductible {
    Amount(i64),
    PerPeril(Map<String, Value>),
}

/// Annualized premium with derived payment-plan amounts. Whole dollars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumBreakdown {
    pub annual: i64,
    pub monthly: i64,
    pub quarterly: i64,
    pub payment_in_full_discount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionalCoverage {
    pub name: String,
    pub additional_premium: i64,
    pub description: String,
}

/// One priced (or declined) coverage within a quote response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote_id: String,
    pub coverage_type: String,
    pub status: QuoteStatus,
    pub coverage_limits: Map<String, Value>,
    pub premium: PremiumBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<Deductible>,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub policy_form: String,
    pub highlights: Vec<String>,
    pub exclusions: Vec<String>,
    pub optional_coverages: Vec<OptionalCoverage>,
    pub underwriting_notes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageDiscount {
    pub available: bool,
    pub discount_percentage: u32,
    pub discount_amount: i64,
    pub description: String,
    pub applied_to: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderwritingSummary {
    pub overall_risk_rating: String,
    pub approval_likelihood: String,
    pub notes: Vec<String>,
}

/// The umbrella response for one quoting request. `valid_until` is stamped
/// once at synthesis and returned verbatim on cache hits; `cache_key` is only
/// present (truncated) on cached responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub carrier_id: String,
    pub carrier_name: String,
    pub carrier_quote_id: String,
    pub requested_quote_id: String,
    pub timestamp: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
    pub quotes: Vec<Quote>,
    pub package_discount: Option<PackageDiscount>,
    pub underwriting_summary: UnderwritingSummary,
    pub bind_eligibility: String,
    pub next_steps: Vec<String>,
}

/// What the quote store holds per indexed id: the full response, the
/// originating request, and when the id named a single coverage, which one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub response: QuoteResponse,
    pub request: QuoteRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_quote: Option<Quote>,
    pub created_at: DateTime<Utc>,
}

impl QuoteRecord {
    /// The coverage binding operates on: the explicitly selected one, else
    /// the first coverage of the response.
    pub fn selected(&self) -> Option<&Quote> {
        self.selected_quote.as_ref().or_else(|| self.response.quotes.first())
    }
}
