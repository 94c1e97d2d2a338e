//! Identifier generation. Seeded identifiers are a pure function of the seed
//! so that semantically identical quote requests mint identical ids; unseeded
//! identifiers (policies, policy numbers) draw from the thread RNG and are
//! unique per call.

use chrono::{Datelike, Utc};
use rand::Rng;

use crate::carriers::CarrierConfig;

/// Reproducible pseudo-random integer in `[0, modulus)`.
///
/// 32-bit polynomial rolling hash over the seed's UTF-16 code units
/// (`h = h * 31 + unit`, wrapping). Stable across processes; never consults
/// the clock or an external randomness source.
pub fn seeded_value(seed: &str, modulus: u32) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs() % modulus
}

/// `{prefix}-Q-{year}-{6 digits}-{suffix}`. With a seed the digits derive
/// from the seed; otherwise they are random.
pub fn quote_id(carrier: &CarrierConfig, coverage_type: &str, seed: Option<&str>) -> String {
    let number = match seed {
        Some(seed) => seeded_value(seed, 999_999),
        None => rand::thread_rng().gen_range(0..999_999),
    };
    format!(
        "{}-Q-{}-{:06}-{}",
        carrier.prefix,
        current_year(),
        number,
        coverage_suffix(coverage_type)
    )
}

/// `{prefix}-P-{year}-{6 digits}`, always random.
pub fn policy_id(carrier: &CarrierConfig) -> String {
    let number = rand::thread_rng().gen_range(0..999_999u32);
    format!("{}-P-{}-{:06}", carrier.prefix, current_year(), number)
}

/// `{prefix}-{year}-{suffix}-{6 digits}`, always random.
pub fn policy_number(carrier: &CarrierConfig, coverage_type: &str) -> String {
    let number = rand::thread_rng().gen_range(0..999_999u32);
    format!(
        "{}-{}-{}-{:06}",
        carrier.prefix,
        current_year(),
        coverage_suffix(coverage_type),
        number
    )
}

pub fn coverage_suffix(coverage_type: &str) -> &'static str {
    match coverage_type {
        "homeowners" => "HO",
        "auto" => "AU",
        "renters" => "RN",
        "life" => "LF",
        "personal_umbrella" => "UM",
        "general_liability" => "GL",
        "professional_liability" => "PL",
        "cyber_liability" => "CY",
        "workers_compensation" => "WC",
        "commercial_property" => "CP",
        "business_auto" => "BA",
        "umbrella" => "UM",
        "directors_officers" => "DO",
        "employment_practices" => "EP",
        "crime" => "CR",
        "media" => "MD",
        "fiduciary" => "FD",
        "employee_benefits" => "EB",
        _ => "XX",
    }
}

fn current_year() -> i32 {
    Utc::now().year()
}
