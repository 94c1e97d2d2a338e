//! Inbound quote request shapes. Field names are the wire contract; optional
//! fields are omitted from serialized output rather than emitted as null.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceType {
    Personal,
    Commercial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Address {
    /// Single-line rendering used for insured and certificate-holder
    /// addresses.
    pub fn formatted(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street.as_deref().unwrap_or(""),
            self.city,
            self.state,
            self.zip
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    pub occupation: String,
    pub credit_score_tier: CreditTier,
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialInfo {
    pub annual_revenue: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_payroll: Option<f64>,
    pub full_time_employees: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_time_employees: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractors: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub legal_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dba_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_structure: Option<String>,
    pub industry: String,
    pub industry_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_started: Option<i32>,
    pub address: Address,
    pub financial_info: FinancialInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<ContactInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dwelling_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roof_age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_system: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garaging_address: Option<Address>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyberInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_cybersecurity_policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_incident_response_plan: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handles_pii: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_records: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_encryption: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_mfa: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub license_number: String,
    pub license_state: String,
    pub years_licensed: u32,
    pub accidents_last_3_years: u32,
    pub violations_last_3_years: u32,
}

/// One requested coverage. `requested_limits` is order-preserving: the first
/// entry is the limit that drives pricing. Auto coverages may carry a
/// per-peril `requested_deductibles` map instead of the single amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoverageRequest {
    pub coverage_type: String,
    pub requested_limits: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_deductible: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_deductibles: Option<Map<String, Value>>,
    pub effective_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_info: Option<PropertyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_info: Option<VehicleInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cyber_info: Option<CyberInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_info: Option<Vec<DriverInfo>>,
}

/// A full quoting request. Exactly one of `personal_info`/`business_info`
/// matches `insurance_type`; `additional_data` is an opaque grab-bag that is
/// stored and echoed but never read by pricing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub quote_request_id: String,
    pub insurance_type: InsuranceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_info: Option<BusinessInfo>,
    pub coverage_requests: Vec<CoverageRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<Value>,
}
