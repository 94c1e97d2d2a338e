//! Quote generation. The engine derives a content-addressable key from the
//! pricing-relevant projection of a request, serves repeat requests from the
//! cache byte-identically, and otherwise synthesizes one priced sub-quote
//! per requested coverage.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::Rng;

use crate::cachekey;
use crate::carriers::{self, CarrierConfig};
use crate::content;
use crate::dates;
use crate::domain::quote::{
    Deductible, PackageDiscount, Quote, QuoteRecord, QuoteResponse, QuoteStatus,
    UnderwritingSummary,
};
use crate::domain::request::QuoteRequest;
use crate::errors::DomainError;
use crate::ident;
use crate::pricing;
use crate::store::{CacheStats, QuoteStore};

/// The underwriting roll. Everything else in a quote is a deterministic
/// function of the cache key; this single decision models underwriting
/// variance and stays random in production.
pub trait ApprovalDecider: Send + Sync {
    fn approve(&self, approval_rate: f64) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RandomApproval;

impl ApprovalDecider for RandomApproval {
    fn approve(&self, approval_rate: f64) -> bool {
        rand::thread_rng().gen::<f64>() < approval_rate
    }
}

pub struct QuoteEngine {
    store: Arc<QuoteStore>,
    approval: Arc<dyn ApprovalDecider>,
}

impl QuoteEngine {
    pub fn new(store: Arc<QuoteStore>) -> Self {
        Self::with_approval(store, Arc::new(RandomApproval))
    }

    pub fn with_approval(store: Arc<QuoteStore>, approval: Arc<dyn ApprovalDecider>) -> Self {
        Self { store, approval }
    }

    /// Quote a request against a carrier. Identical requests (under the
    /// cache-key projection) return the stored response with `cached: true`
    /// and a truncated key for diagnostics; ids, premiums, and the validity
    /// window are returned exactly as first synthesized.
    pub fn generate_quote(
        &self,
        carrier_id: &str,
        request: &QuoteRequest,
    ) -> Result<QuoteResponse, DomainError> {
        let carrier = carriers::carrier_config(carrier_id)
            .ok_or_else(|| DomainError::CarrierNotFound { carrier_id: carrier_id.to_owned() })?;

        let key = cachekey::cache_key(carrier_id, request);
        let (mut response, was_cached) = self
            .store
            .lookup_or_insert_with(&key, || self.synthesize(carrier, carrier_id, request, &key));

        if was_cached {
            response.cached = true;
            response.cache_key = Some(cachekey::truncated(&key).to_owned());
        }
        Ok(response)
    }

    fn synthesize(
        &self,
        carrier: &CarrierConfig,
        carrier_id: &str,
        request: &QuoteRequest,
        key: &str,
    ) -> QuoteResponse {
        let carrier_quote_id = ident::quote_id(carrier, "main", None);
        let timestamp = Utc::now();
        let valid_until = timestamp + Duration::days(30);

        let quotes: Vec<Quote> = request
            .coverage_requests
            .iter()
            .map(|coverage| {
                let quote_id = ident::quote_id(carrier, &coverage.coverage_type, Some(key));
                let base =
                    pricing::base_premium(coverage, request.business_info.as_ref(), Some(key));
                let annual = (base as f64 * carrier.pricing_multiplier).round() as i64;
                let approved = self.approval.approve(carrier.approval_rate);

                let deductible = coverage
                    .requested_deductibles
                    .clone()
                    .map(Deductible::PerPeril)
                    .or(coverage.requested_deductible.map(Deductible::Amount));

                Quote {
                    quote_id,
                    coverage_type: coverage.coverage_type.clone(),
                    status: if approved { QuoteStatus::Quoted } else { QuoteStatus::Declined },
                    coverage_limits: coverage.requested_limits.clone(),
                    premium: pricing::breakdown(annual),
                    deductible,
                    effective_date: coverage.effective_date,
                    expiration_date: dates::plus_one_year(coverage.effective_date),
                    policy_form: content::policy_form(&coverage.coverage_type).to_owned(),
                    highlights: content::highlights(&coverage.coverage_type),
                    exclusions: content::exclusions(&coverage.coverage_type),
                    optional_coverages: content::optional_coverages(&coverage.coverage_type),
                    underwriting_notes: content::underwriting_notes(
                        request.business_info.as_ref(),
                        request.personal_info.as_ref(),
                    ),
                    decline_reason: (!approved)
                        .then(|| content::decline_reason(&coverage.coverage_type, carrier.name)),
                    decline_code: (!approved).then(|| "OUTSIDE_APPETITE".to_owned()),
                }
            })
            .collect();

        let package_discount = package_discount(&quotes);

        let response = QuoteResponse {
            success: true,
            carrier_id: carrier_id.to_owned(),
            carrier_name: carrier.name.to_owned(),
            carrier_quote_id: carrier_quote_id.clone(),
            requested_quote_id: request.quote_request_id.clone(),
            timestamp,
            valid_until,
            cached: false,
            cache_key: None,
            quotes,
            package_discount,
            underwriting_summary: UnderwritingSummary {
                overall_risk_rating: "preferred".to_owned(),
                approval_likelihood: "high".to_owned(),
                notes: vec![
                    format!("{} standard underwriting", carrier.name),
                    "All requested coverages reviewed".to_owned(),
                    "Competitive pricing applied".to_owned(),
                ],
            },
            bind_eligibility: "eligible_immediate".to_owned(),
            next_steps: vec![
                "Review quotes and select coverages".to_owned(),
                "Proceed to bind endpoint to purchase".to_owned(),
                format!("Quotes valid until {}", valid_until.date_naive()),
            ],
        };

        // Index under the umbrella id and under every per-coverage id so a
        // later bind can reference either.
        self.store.index(
            carrier_quote_id,
            QuoteRecord {
                response: response.clone(),
                request: request.clone(),
                selected_quote: None,
                created_at: timestamp,
            },
        );
        for quote in &response.quotes {
            self.store.index(
                quote.quote_id.clone(),
                QuoteRecord {
                    response: response.clone(),
                    request: request.clone(),
                    selected_quote: Some(quote.clone()),
                    created_at: timestamp,
                },
            );
        }

        response
    }

    pub fn quote(&self, quote_id: &str) -> Result<QuoteRecord, DomainError> {
        self.store
            .get(quote_id)
            .ok_or_else(|| DomainError::QuoteNotFound { quote_id: quote_id.to_owned() })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }

    pub fn clear_cache(&self) {
        self.store.clear_cache();
    }
}

fn package_discount(quotes: &[Quote]) -> Option<PackageDiscount> {
    if quotes.len() < 2 || quotes.iter().any(|quote| quote.status != QuoteStatus::Quoted) {
        return None;
    }
    let total: i64 = quotes.iter().map(|quote| quote.premium.annual).sum();
    Some(PackageDiscount {
        available: true,
        discount_percentage: 5,
        discount_amount: (total as f64 * 0.05).round() as i64,
        description: "Multi-coverage package discount".to_owned(),
        applied_to: "all_coverages".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Datelike, Utc};
    use serde_json::json;

    use crate::domain::quote::QuoteStatus;
    use crate::domain::request::QuoteRequest;
    use crate::errors::DomainError;
    use crate::store::QuoteStore;

    use super::{ApprovalDecider, QuoteEngine};

    struct ApproveAll;
    impl ApprovalDecider for ApproveAll {
        fn approve(&self, _approval_rate: f64) -> bool {
            true
        }
    }

    struct DeclineAll;
    impl ApprovalDecider for DeclineAll {
        fn approve(&self, _approval_rate: f64) -> bool {
            false
        }
    }

    fn engine() -> QuoteEngine {
        QuoteEngine::with_approval(Arc::new(QuoteStore::new()), Arc::new(ApproveAll))
    }

    fn gl_request(email: &str, revenue: f64) -> QuoteRequest {
        serde_json::from_value(json!({
            "quote_request_id": "req-200",
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
                "requested_limits": { "per_occurrence": 1000000 },
                "requested_deductible": 500,
                "effective_date": "2026-09-01"
            }]
        }))
        .expect("request fixture")
    }

    fn two_coverage_request() -> QuoteRequest {
        serde_json::from_value(json!({
            "quote_request_id": "req-201",
            "insurance_type": "commercial",
            "business_info": {
                "legal_name": "Acme Robotics LLC",
                "industry": "Technology",
                "industry_code": "541511",
                "address": { "city": "Austin", "state": "TX", "zip": "78701" },
                "financial_info": { "annual_revenue": 500000, "full_time_employees": 12 }
            },
            "coverage_requests": [
                {
                    "coverage_type": "general_liability",
                    "requested_limits": { "per_occurrence": 1000000 },
                    "requested_deductible": 500,
                    "effective_date": "2026-09-01"
                },
                {
                    "coverage_type": "cyber_liability",
                    "requested_limits": { "aggregate": 1000000 },
                    "requested_deductible": 2500,
                    "effective_date": "2026-09-01",
                    "cyber_info": { "has_cybersecurity_policy": true, "number_of_records": 20000 }
                }
            ]
        }))
        .expect("request fixture")
    }

    #[test]
    fn identical_requests_hit_the_cache_byte_identically() {
        let engine = engine();
        let first = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("first quote");
        let second = engine
            .generate_quote("reliable_insurance", &gl_request("b@acme.com", 500_000.0))
            .expect("second quote");

        assert!(!first.cached);
        assert!(first.cache_key.is_none());
        assert!(second.cached);
        assert_eq!(second.cache_key.as_ref().map(String::len), Some(16));

        assert_eq!(second.carrier_quote_id, first.carrier_quote_id);
        assert_eq!(second.quotes[0].quote_id, first.quotes[0].quote_id);
        assert_eq!(second.quotes[0].premium, first.quotes[0].premium);
        assert_eq!(second.valid_until, first.valid_until, "cache hits must not re-stamp validity");
        assert_eq!(second.timestamp, first.timestamp);
    }

    #[test]
    fn projected_field_change_misses_the_cache() {
        let engine = engine();
        let first = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("first quote");
        let second = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 1_000_000.0))
            .expect("second quote");

        assert!(!second.cached);
        assert_ne!(second.quotes[0].quote_id, first.quotes[0].quote_id);
    }

    #[test]
    fn quote_id_matches_the_documented_shape() {
        let engine = engine();
        let response = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("quote");

        let quote_id = &response.quotes[0].quote_id;
        let year = Utc::now().year();
        let prefix = format!("RIC-Q-{year}-");
        assert!(quote_id.starts_with(&prefix), "unexpected id {quote_id}");
        assert!(quote_id.ends_with("-GL"), "unexpected id {quote_id}");
        let digits = &quote_id[prefix.len()..quote_id.len() - 3];
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn umbrella_id_uses_the_fallback_suffix() {
        let engine = engine();
        let response = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("quote");
        assert!(response.carrier_quote_id.ends_with("-XX"));
    }

    #[test]
    fn carrier_multiplier_scales_the_premium() {
        let stores = (Arc::new(QuoteStore::new()), Arc::new(QuoteStore::new()));
        let baseline = QuoteEngine::with_approval(stores.0, Arc::new(ApproveAll));
        let premium_carrier = QuoteEngine::with_approval(stores.1, Arc::new(ApproveAll));

        let request = gl_request("a@acme.com", 500_000.0);
        let base = baseline
            .generate_quote("reliable_insurance", &request)
            .expect("baseline quote");
        let premium = premium_carrier
            .generate_quote("premier_underwriters", &request)
            .expect("premier quote");

        // Different carriers produce different cache keys and seeds, so only
        // a coarse comparison is meaningful: premier's 1.25x multiplier must
        // dominate the ±10% variation band.
        assert!(premium.quotes[0].premium.annual > base.quotes[0].premium.annual);
    }

    #[test]
    fn package_discount_requires_all_coverages_approved() {
        let engine = engine();
        let response = engine
            .generate_quote("reliable_insurance", &two_coverage_request())
            .expect("quote");

        let discount = response.package_discount.as_ref().expect("package discount");
        let total: i64 = response.quotes.iter().map(|quote| quote.premium.annual).sum();
        assert_eq!(discount.discount_percentage, 5);
        assert_eq!(discount.discount_amount, (total as f64 * 0.05).round() as i64);

        let declining =
            QuoteEngine::with_approval(Arc::new(QuoteStore::new()), Arc::new(DeclineAll));
        let declined = declining
            .generate_quote("reliable_insurance", &two_coverage_request())
            .expect("declined quote");
        assert!(declined.package_discount.is_none());
        assert_eq!(declined.quotes[0].status, QuoteStatus::Declined);
        assert_eq!(declined.quotes[0].decline_code.as_deref(), Some("OUTSIDE_APPETITE"));
        assert!(declined.quotes[0]
            .decline_reason
            .as_deref()
            .is_some_and(|reason| reason.contains("Reliable Insurance Co.")));
    }

    #[test]
    fn single_coverage_never_gets_a_package_discount() {
        let engine = engine();
        let response = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("quote");
        assert!(response.package_discount.is_none());
    }

    #[test]
    fn unknown_carrier_is_rejected() {
        let engine = engine();
        let error = engine
            .generate_quote("nowhere_mutual", &gl_request("a@acme.com", 500_000.0))
            .expect_err("unknown carrier must fail");
        assert_eq!(error, DomainError::CarrierNotFound { carrier_id: "nowhere_mutual".to_owned() });
    }

    #[test]
    fn quotes_are_indexed_under_umbrella_and_coverage_ids() {
        let engine = engine();
        let response = engine
            .generate_quote("reliable_insurance", &two_coverage_request())
            .expect("quote");

        let by_umbrella = engine.quote(&response.carrier_quote_id).expect("umbrella lookup");
        assert!(by_umbrella.selected_quote.is_none());
        assert_eq!(
            by_umbrella.selected().map(|quote| quote.quote_id.as_str()),
            Some(response.quotes[0].quote_id.as_str()),
            "umbrella lookups select the first coverage"
        );

        let by_coverage = engine.quote(&response.quotes[1].quote_id).expect("coverage lookup");
        assert_eq!(
            by_coverage.selected().map(|quote| quote.coverage_type.as_str()),
            Some("cyber_liability")
        );

        let stats = engine.cache_stats();
        assert_eq!(stats.total_cached_quotes, 1);
        assert_eq!(stats.total_quotes_by_id, 3);
    }

    #[test]
    fn clearing_the_cache_forces_resynthesis_but_keeps_the_index() {
        let engine = engine();
        let first = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("first quote");

        engine.clear_cache();

        let second = engine
            .generate_quote("reliable_insurance", &gl_request("a@acme.com", 500_000.0))
            .expect("second quote");
        assert!(!second.cached, "cleared cache must synthesize fresh");
        assert_eq!(
            second.quotes[0].quote_id, first.quotes[0].quote_id,
            "per-coverage ids are seeded by the cache key and survive resynthesis"
        );
        assert!(engine.quote(&first.carrier_quote_id).is_ok(), "index survives cache clears");
    }

    #[test]
    fn missing_quote_lookup_fails() {
        let engine = engine();
        let error = engine.quote("RIC-Q-2026-000000-GL").expect_err("unknown quote");
        assert_eq!(
            error,
            DomainError::QuoteNotFound { quote_id: "RIC-Q-2026-000000-GL".to_owned() }
        );
    }
}
