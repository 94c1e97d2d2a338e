//! Premium computation. Illustrative linear adjustments, not an actuarial
//! model: a per-coverage base rate scaled by the first requested limit and
//! by business revenue, with a ±10% variation that is deterministic whenever
//! a seed (the cache key) is supplied.

use rand::Rng;
use serde_json::{Map, Value};

use crate::domain::quote::PremiumBreakdown;
use crate::domain::request::{BusinessInfo, CoverageRequest};
use crate::ident;

const REFERENCE_LIMIT: f64 = 1_000_000.0;
const REVENUE_SCALE: f64 = 5_000_000.0;

fn base_rate(coverage_type: &str) -> f64 {
    match coverage_type {
        // Personal lines
        "homeowners" => 1200.0,
        "auto" => 900.0,
        "renters" => 250.0,
        "life" => 500.0,
        "personal_umbrella" => 300.0,
        // Commercial lines
        "general_liability" => 1250.0,
        "professional_liability" => 2500.0,
        "cyber_liability" => 3000.0,
        "workers_compensation" => 1800.0,
        "commercial_property" => 2000.0,
        "business_auto" => 1500.0,
        "umbrella" => 800.0,
        "directors_officers" => 3500.0,
        "employment_practices" => 2200.0,
        "crime" => 1000.0,
        "media" => 1800.0,
        "fiduciary" => 2500.0,
        "employee_benefits" => 1200.0,
        _ => 1000.0,
    }
}

fn first_limit(limits: &Map<String, Value>) -> Option<f64> {
    limits.values().next().and_then(Value::as_f64).filter(|limit| *limit != 0.0)
}

/// Base annual premium for one coverage, before the carrier multiplier.
/// With a seed the variation factor is a pure function of
/// `seed + coverage_type`; without one it is drawn from the thread RNG.
pub fn base_premium(
    coverage: &CoverageRequest,
    business_info: Option<&BusinessInfo>,
    seed: Option<&str>,
) -> i64 {
    let mut base = base_rate(&coverage.coverage_type);

    if let Some(limit) = first_limit(&coverage.requested_limits) {
        base *= limit / REFERENCE_LIMIT;
    }

    if let Some(info) = business_info {
        base *= 1.0 + info.financial_info.annual_revenue / REVENUE_SCALE;
    }

    let variation = match seed {
        Some(seed) => {
            let roll = format!("{seed}{}", coverage.coverage_type);
            0.9 + f64::from(ident::seeded_value(&roll, 1000)) / 1000.0 * 0.2
        }
        None => 0.9 + rand::thread_rng().gen::<f64>() * 0.2,
    };

    (base * variation).round() as i64
}

/// Payment-plan breakdown of an annual premium, in whole dollars.
pub fn breakdown(annual: i64) -> PremiumBreakdown {
    PremiumBreakdown {
        annual,
        monthly: div_round(annual, 12),
        quarterly: div_round(annual, 4),
        payment_in_full_discount: (annual as f64 * 0.05).round() as i64,
    }
}

fn div_round(amount: i64, parts: i64) -> i64 {
    (amount as f64 / parts as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::request::{BusinessInfo, CoverageRequest};

    use super::{base_premium, breakdown};

    fn coverage(coverage_type: &str, limit: i64) -> CoverageRequest {
        serde_json::from_value(json!({
            "coverage_type": coverage_type,
            "requested_limits": { "per_occurrence": limit },
            "effective_date": "2026-09-01"
        }))
        .expect("coverage fixture")
    }

    fn business(revenue: f64) -> BusinessInfo {
        serde_json::from_value(json!({
            "legal_name": "Acme Robotics LLC",
            "industry": "Technology",
            "industry_code": "541511",
            "address": { "city": "Austin", "state": "TX", "zip": "78701" },
            "financial_info": { "annual_revenue": revenue, "full_time_employees": 12 }
        }))
        .expect("business fixture")
    }

    #[test]
    fn seeded_premium_is_reproducible() {
        let coverage = coverage("general_liability", 1_000_000);
        let info = business(500_000.0);
        let first = base_premium(&coverage, Some(&info), Some("seed-1"));
        let second = base_premium(&coverage, Some(&info), Some("seed-1"));
        assert_eq!(first, second);
    }

    #[test]
    fn premium_is_monotone_in_the_requested_limit() {
        let info = business(500_000.0);
        let low = base_premium(&coverage("general_liability", 1_000_000), Some(&info), Some("s"));
        let high = base_premium(&coverage("general_liability", 2_000_000), Some(&info), Some("s"));
        assert!(high >= low, "premium dropped when the limit doubled: {low} -> {high}");
    }

    #[test]
    fn revenue_scales_the_premium() {
        let coverage = coverage("general_liability", 1_000_000);
        let small = base_premium(&coverage, Some(&business(500_000.0)), Some("s"));
        let large = base_premium(&coverage, Some(&business(4_500_000.0)), Some("s"));
        assert!(large > small);
    }

    #[test]
    fn zero_limit_does_not_zero_the_premium() {
        let without_limit: CoverageRequest = serde_json::from_value(json!({
            "coverage_type": "renters",
            "requested_limits": { "contents": 0 },
            "effective_date": "2026-09-01"
        }))
        .expect("coverage fixture");
        assert!(base_premium(&without_limit, None, Some("s")) > 0);
    }

    #[test]
    fn unknown_coverage_uses_the_default_rate() {
        let premium = base_premium(&coverage("pet_insurance", 1_000_000), None, Some("s"));
        // default 1000 with variation in [0.9, 1.1]
        assert!((900..=1100).contains(&premium), "unexpected premium {premium}");
    }

    #[test]
    fn variation_stays_within_ten_percent() {
        for seed in ["a", "b", "c", "d", "e"] {
            let premium = base_premium(&coverage("crime", 1_000_000), None, Some(seed));
            assert!((900..=1100).contains(&premium), "seed {seed} gave {premium}");
        }
    }

    #[test]
    fn breakdown_rounds_each_plan() {
        let premium = breakdown(1250);
        assert_eq!(premium.annual, 1250);
        assert_eq!(premium.monthly, 104);
        assert_eq!(premium.quarterly, 313);
        assert_eq!(premium.payment_in_full_discount, 63);
    }
}
