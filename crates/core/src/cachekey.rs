//! Content-addressable cache keys for quote requests.
//!
//! The key is a SHA-256 digest over a normalized JSON projection holding only
//! the pricing-relevant fields. Anything outside the projection (contact
//! details, additional insureds, grab-bag payloads, driver lists) cannot
//! reach the digest, so requests differing only in those fields share a key.

use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::domain::request::QuoteRequest;

/// Length of the key prefix surfaced for diagnostics (cache stats, the
/// `cache_key` response field).
pub const TRUNCATED_KEY_LEN: usize = 16;

pub fn cache_key(carrier_id: &str, request: &QuoteRequest) -> String {
    let personal = request.personal_info.as_ref().map(|info| {
        json!({
            "occupation": info.occupation,
            "credit_score_tier": info.credit_score_tier,
            "state": info.address.state,
            "zip": info.address.zip,
        })
    });

    let business = request.business_info.as_ref().map(|info| {
        json!({
            "industry": info.industry,
            "industry_code": info.industry_code,
            "annual_revenue": info.financial_info.annual_revenue,
            "employees": info.financial_info.full_time_employees,
            "state": info.address.state,
            "zip": info.address.zip,
        })
    });

    let coverages: Vec<Value> = request
        .coverage_requests
        .iter()
        .map(|coverage| {
            let property = coverage.property_info.as_ref();
            let vehicle = coverage.vehicle_info.as_ref();
            let cyber = coverage.cyber_info.as_ref();
            json!({
                "coverage_type": coverage.coverage_type,
                "requested_limits": Value::Object(coverage.requested_limits.clone()),
                "requested_deductible": coverage.requested_deductible,
                "effective_date": coverage.effective_date,
                "dwelling_value": property.and_then(|p| p.dwelling_value),
                "year_built": property.and_then(|p| p.year_built),
                "construction_type": property.and_then(|p| p.construction_type.as_deref()),
                "vehicle_year": vehicle.map(|v| v.year),
                "vehicle_make": vehicle.map(|v| v.make.as_str()),
                "vehicle_model": vehicle.map(|v| v.model.as_str()),
                "has_cybersecurity": cyber.and_then(|c| c.has_cybersecurity_policy),
                "number_of_records": cyber.and_then(|c| c.number_of_records),
            })
        })
        .collect();

    let projection = json!({
        "carrier_id": carrier_id,
        "insurance_type": request.insurance_type,
        "personal_info": personal,
        "business_info": business,
        "coverage_requests": coverages,
    });

    let digest = Sha256::digest(projection.to_string().as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Key prefix shown in diagnostics.
pub fn truncated(key: &str) -> &str {
    &key[..key.len().min(TRUNCATED_KEY_LEN)]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::request::QuoteRequest;

    use super::{cache_key, truncated};

    fn commercial_request(email: &str, revenue: f64) -> QuoteRequest {
        serde_json::from_value(json!({
            "quote_request_id": "req-100",
            "insurance_type": "commercial",
            "business_info": {
                "legal_name": "Acme Robotics LLC",
                "industry": "Technology",
                "industry_code": "541511",
                "address": { "city": "Austin", "state": "TX", "zip": "78701" },
                "financial_info": { "annual_revenue": revenue, "full_time_employees": 12 },
                "contact_info": {
                    "first_name": "Sam", "last_name": "Reyes",
                    "email": email, "phone": "555-0101"
                }
            },
            "coverage_requests": [{
                "coverage_type": "general_liability",
                "requested_limits": { "per_occurrence": 1000000, "aggregate": 2000000 },
                "requested_deductible": 500,
                "effective_date": "2026-09-01"
            }]
        }))
        .expect("request fixture")
    }

    #[test]
    fn key_is_a_sha256_hex_digest() {
        let key = cache_key("reliable_insurance", &commercial_request("a@acme.com", 500_000.0));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn unprojected_fields_do_not_affect_the_key() {
        let first = cache_key("reliable_insurance", &commercial_request("a@acme.com", 500_000.0));
        let second = cache_key("reliable_insurance", &commercial_request("b@acme.com", 500_000.0));
        assert_eq!(first, second);
    }

    #[test]
    fn grab_bag_payloads_do_not_affect_the_key() {
        let mut request = commercial_request("a@acme.com", 500_000.0);
        let baseline = cache_key("reliable_insurance", &request);
        request.additional_data = Some(json!({ "utm_source": "partner", "notes": "rush" }));
        assert_eq!(cache_key("reliable_insurance", &request), baseline);
    }

    #[test]
    fn projected_fields_discriminate() {
        let first = cache_key("reliable_insurance", &commercial_request("a@acme.com", 500_000.0));
        let second =
            cache_key("reliable_insurance", &commercial_request("a@acme.com", 1_000_000.0));
        assert_ne!(first, second);
    }

    #[test]
    fn carrier_is_part_of_the_key() {
        let request = commercial_request("a@acme.com", 500_000.0);
        assert_ne!(
            cache_key("reliable_insurance", &request),
            cache_key("fastbind_insurance", &request)
        );
    }

    #[test]
    fn coverage_details_discriminate() {
        let mut request = commercial_request("a@acme.com", 500_000.0);
        let baseline = cache_key("reliable_insurance", &request);
        request.coverage_requests[0].requested_deductible = Some(1000);
        assert_ne!(cache_key("reliable_insurance", &request), baseline);
    }

    #[test]
    fn truncation_is_a_prefix() {
        let key = cache_key("reliable_insurance", &commercial_request("a@acme.com", 500_000.0));
        assert_eq!(truncated(&key), &key[..16]);
        assert_eq!(truncated("short"), "short");
    }
}
