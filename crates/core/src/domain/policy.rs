//! Bound-policy records and their appendable artifacts (endorsements,
//! certificates). Policies are created only by binding and never deleted;
//! cancellation is a status transition.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::quote::Deductible;
use crate::domain::request::{Address, InsuranceType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    Bound,
    Active,
    Expired,
    PendingCancellation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPlan {
    Monthly,
    Quarterly,
    Annual,
}

/// Premium as bound: the annual figure plus the recurring amount derived
/// from the selected plan. `monthly_amount` is the historical wire name for
/// the recurring amount regardless of plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyPremium {
    pub annual: i64,
    pub payment_plan: PaymentPlan,
    pub monthly_amount: i64,
    pub first_payment_due: NaiveDate,
    pub next_payment_date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierContact {
    pub policy_service_phone: String,
    pub claims_phone: String,
    pub email: String,
    pub claims_email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInsured {
    pub name: String,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub policy_id: String,
    pub policy_number: String,
    pub status: PolicyStatus,
    pub insurance_type: InsuranceType,
    pub coverage_type: String,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
    pub insured_name: String,
    pub insured_address: String,
    pub coverage_limits: Map<String, Value>,
    pub premium: PolicyPremium,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deductible: Option<Deductible>,
    pub carrier_contact: CarrierContact,
    pub documents: Vec<PolicyDocument>,
    pub endorsements: Vec<Endorsement>,
    pub additional_insureds: Vec<AdditionalInsured>,
}

/// Read view of a policy: the record plus the derived time-to-expiration,
/// with the status shown as `expired` once that goes negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyView {
    #[serde(flatten)]
    pub policy: Policy,
    pub days_until_expiration: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementPremiumChange {
    pub amount: i64,
    pub annual_adjustment: i64,
    pub pro_rated_charge: i64,
    pub explanation: String,
}

/// Appended to a policy's endorsement list; never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endorsement {
    pub endorsement_id: String,
    pub policy_id: String,
    pub status: String,
    pub endorsement_type: String,
    pub effective_date: NaiveDate,
    pub premium_change: EndorsementPremiumChange,
    pub documents: Vec<PolicyDocument>,
    pub confirmation_email_sent: bool,
    pub next_steps: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateHolderSummary {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDocument {
    pub url: String,
    pub format: String,
    pub size_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateCoverageSummary {
    pub coverage_type: String,
    pub limits: String,
    pub policy_number: String,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

/// A certificate of insurance, derived from the policy at issue time and
/// appended to the policy's certificate list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub certificate_id: String,
    pub policy_id: String,
    pub certificate_number: String,
    pub issued_date: NaiveDate,
    pub certificate_holder: CertificateHolderSummary,
    pub format: String,
    pub document: CertificateDocument,
    pub generated_at: DateTime<Utc>,
    pub expires_at: NaiveDate,
    pub coverage_summary: CertificateCoverageSummary,
    pub description_of_operations: String,
    pub special_provisions: Vec<String>,
    pub confirmation_email_sent: bool,
    pub next_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{PaymentPlan, PolicyStatus};

    #[test]
    fn statuses_use_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_value(PolicyStatus::PendingCancellation).expect("serializes"),
            serde_json::json!("pending_cancellation")
        );
        assert_eq!(
            serde_json::to_value(PolicyStatus::Bound).expect("serializes"),
            serde_json::json!("bound")
        );
    }

    #[test]
    fn payment_plans_round_trip() {
        for (plan, wire) in [
            (PaymentPlan::Monthly, "monthly"),
            (PaymentPlan::Quarterly, "quarterly"),
            (PaymentPlan::Annual, "annual"),
        ] {
            let value = serde_json::to_value(plan).expect("serializes");
            assert_eq!(value, serde_json::json!(wire));
            let back: PaymentPlan = serde_json::from_value(value).expect("deserializes");
            assert_eq!(back, plan);
        }
    }
}
