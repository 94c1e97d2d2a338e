//! Request and result shapes for the policy lifecycle operations: bind,
//! renew, endorse, cancel, certificate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::policy::{
    AdditionalInsured, Certificate, Endorsement, Policy, PolicyStatus, PaymentPlan, PolicyDocument,
};
use crate::domain::quote::Deductible;
use crate::domain::request::{Address, ContactInfo};

// ---------------------------------------------------------------------------
// Bind
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: String,
    pub token: String,
    pub billing_address: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuredInfo {
    pub primary_contact: ContactInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_insureds: Option<Vec<AdditionalInsured>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub full_name: String,
    pub signed_at: String,
    pub ip_address: String,
}

/// Purchase of a previously issued quote. `customizations` is an opaque
/// grab-bag, echoed but never inspected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BindRequest {
    pub quote_id: String,
    pub effective_date: NaiveDate,
    pub payment_plan: PaymentPlan,
    pub payment_info: PaymentInfo,
    pub insured_info: InsuredInfo,
    pub signature: Signature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customizations: Option<Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub amount: i64,
    pub currency: String,
    pub payment_method: String,
    pub status: String,
    pub receipt_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BindResult {
    pub success: bool,
    pub carrier_id: String,
    pub bind_id: String,
    pub policy: Policy,
    pub payment_confirmation: PaymentConfirmation,
    pub bound_at: DateTime<Utc>,
    pub confirmation_email_sent: bool,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Renew
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_changed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_annual_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees_changed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_full_time_employees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_part_time_employees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations_changed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations_changed: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increase_limits: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_limits: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_coverages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remove_coverages: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenewRequest {
    pub renewal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_changes: Option<BusinessChanges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_changes: Option<CoverageChanges>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desired_effective_date: Option<NaiveDate>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalPremium {
    pub annual: i64,
    pub monthly: i64,
    pub quarterly: i64,
}

/// Delta against the expiring term, with the applied adjustments listed in
/// application order (surcharges first, loyalty discount last).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalPremiumChange {
    pub amount: i64,
    pub percentage: i64,
    pub reasons: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyDiscount {
    pub percentage: u32,
    pub amount: i64,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenewalQuoteDetail {
    pub quote_id: String,
    pub coverage_type: String,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub coverage_limits: Map<String, Value>,
    pub premium: RenewalPremium,
    pub premium_change: RenewalPremiumChange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<Deductible>,
    pub loyalty_discount: LoyaltyDiscount,
    pub valid_until: DateTime<Utc>,
    pub highlights: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenewalQuote {
    pub success: bool,
    pub renewal_quote_id: String,
    pub original_policy_id: String,
    pub renewal_status: String,
    pub quote: RenewalQuoteDetail,
    pub underwriting_notes: Vec<String>,
    pub bind_eligibility: String,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Endorse
// ---------------------------------------------------------------------------

/// `details` carries endorsement-type-specific payloads (additional
/// insureds, new limits); it is recorded but plays no part in pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndorseRequest {
    pub endorsement_type: String,
    pub effective_date: NaiveDate,
    pub details: Value,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedPolicySummary {
    pub total_annual_premium: i64,
    pub endorsements_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementResult {
    pub success: bool,
    #[serde(flatten)]
    pub endorsement: Endorsement,
    pub updated_policy_summary: UpdatedPolicySummary,
}

// ---------------------------------------------------------------------------
// Cancel
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub cancellation_type: String,
    pub effective_date: NaiveDate,
    pub reason: String,
    pub signature: Signature,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundBreakdown {
    pub total_premium_paid: i64,
    pub days_policy_active: i64,
    pub total_days: i64,
    pub percentage_earned: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub earned_premium: i64,
    pub unearned_premium: i64,
    pub cancellation_fee: i64,
    pub short_rate_penalty: i64,
    pub net_refund: i64,
    pub refund_method: String,
    pub estimated_refund_date: NaiveDate,
    pub refund_breakdown: RefundBreakdown,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CancellationResult {
    pub success: bool,
    pub cancellation_id: String,
    pub policy_id: String,
    pub policy_number: String,
    pub status: PolicyStatus,
    pub effective_date: NaiveDate,
    pub cancellation_type: String,
    pub refund: Refund,
    pub documents: Vec<PolicyDocument>,
    pub important_notes: Vec<String>,
    pub confirmation_email_sent: bool,
    pub next_steps: Vec<String>,
}

// ---------------------------------------------------------------------------
// Certificate
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateHolder {
    pub name: String,
    pub address: Address,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CertificateRequest {
    pub certificate_holder: CertificateHolder,
    pub additional_insured: bool,
    pub description_of_operations: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_provisions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateResult {
    pub success: bool,
    #[serde(flatten)]
    pub certificate: Certificate,
}
