//! Static per-coverage document content: policy forms, marketing highlights,
//! exclusions, optional coverages, and underwriting notes. Pure lookups.

use crate::domain::quote::OptionalCoverage;
use crate::domain::request::{BusinessInfo, CreditTier, PersonalInfo};

pub fn policy_form(coverage_type: &str) -> &'static str {
    match coverage_type {
        "general_liability" => "ISO CGL",
        "professional_liability" => "Claims-Made",
        "cyber_liability" => "Cyber Pro Form",
        "homeowners" => "HO-3",
        "auto" => "Personal Auto Policy",
        "renters" => "HO-4",
        "life" => "Term Life",
        _ => "Standard Form",
    }
}

pub fn highlights(coverage_type: &str) -> Vec<String> {
    let lines: &[&str] = match coverage_type {
        "general_liability" => &[
            "Coverage for bodily injury and property damage",
            "Legal defense costs covered in addition to limits",
            "Medical payments included",
            "Products and completed operations coverage",
            "Contractual liability coverage",
        ],
        "cyber_liability" => &[
            "Data breach notification and credit monitoring",
            "Forensic investigation costs",
            "Business interruption from cyber events",
            "Cyber extortion and ransomware coverage",
            "24/7 incident response hotline",
        ],
        "professional_liability" => &[
            "Covers professional errors and omissions",
            "Defense costs in addition to policy limits",
            "Prior acts coverage included",
            "Extended reporting period available",
            "Contractual liability coverage",
        ],
        "homeowners" => &[
            "Replacement cost dwelling coverage",
            "Personal property coverage",
            "Liability protection",
            "Additional living expenses covered",
            "24/7 claims support",
        ],
        "auto" => &[
            "Liability coverage",
            "Collision and comprehensive coverage",
            "Uninsured/underinsured motorist protection",
            "Roadside assistance available",
            "Rental car reimbursement",
        ],
        _ => &[
            "Comprehensive coverage",
            "Competitive rates",
            "24/7 support",
            "Fast claims processing",
            "Flexible payment options",
        ],
    };
    lines.iter().map(|line| (*line).to_owned()).collect()
}

pub fn exclusions(coverage_type: &str) -> Vec<String> {
    let lines: &[&str] = match coverage_type {
        "general_liability" => &[
            "Professional services (covered by E&O)",
            "Pollution liability",
            "Employee injuries (covered by Workers Comp)",
            "Auto liability (requires separate policy)",
            "Cyber incidents (requires cyber policy)",
        ],
        "cyber_liability" => &[
            "War and terrorism",
            "Failure to maintain required security standards",
            "Theft of intellectual property",
            "Loss of future revenue",
        ],
        "professional_liability" => &[
            "Bodily injury or property damage",
            "Intentional acts or fraud",
            "Violations of securities laws",
            "Patent or trademark infringement",
        ],
        "homeowners" => &[
            "Flood damage (requires separate policy)",
            "Earthquake damage",
            "Wear and tear",
            "Intentional damage",
            "Business activities",
        ],
        _ => &[
            "Intentional acts",
            "War and terrorism",
            "Nuclear hazards",
            "Certain natural disasters",
        ],
    };
    lines.iter().map(|line| (*line).to_owned()).collect()
}

pub fn optional_coverages(coverage_type: &str) -> Vec<OptionalCoverage> {
    match coverage_type {
        "general_liability" => vec![
            OptionalCoverage {
                name: "Hired and Non-Owned Auto Liability".to_owned(),
                additional_premium: 125,
                description: "Liability for rented, leased, or borrowed vehicles".to_owned(),
            },
            OptionalCoverage {
                name: "Employee Benefits Liability".to_owned(),
                additional_premium: 300,
                description: "Coverage for errors in benefits administration".to_owned(),
            },
        ],
        "cyber_liability" => vec![
            OptionalCoverage {
                name: "Social Engineering Coverage".to_owned(),
                additional_premium: 450,
                description: "Coverage for funds transfer fraud".to_owned(),
            },
            OptionalCoverage {
                name: "Media Liability".to_owned(),
                additional_premium: 600,
                description: "Copyright infringement and defamation coverage".to_owned(),
            },
        ],
        _ => Vec::new(),
    }
}

pub fn underwriting_notes(
    business_info: Option<&BusinessInfo>,
    personal_info: Option<&PersonalInfo>,
) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(info) = business_info {
        if info.financial_info.annual_revenue < 1_000_000.0 {
            notes.push("Small business with manageable risk profile".to_owned());
        }
        if info.industry.to_lowercase().contains("tech") {
            notes.push("Technology sector - aligned with carrier specialization".to_owned());
        }
        notes.push("No prior claims history reported".to_owned());
    }

    if let Some(info) = personal_info {
        match info.credit_score_tier {
            CreditTier::Excellent => {
                notes.push("Excellent credit score provides 15% discount".to_owned());
            }
            CreditTier::Good => notes.push("Good credit score provides 10% discount".to_owned()),
            CreditTier::Fair | CreditTier::Poor => {}
        }
    }

    notes.push("Competitive market conditions".to_owned());
    notes.push("Standard underwriting approval".to_owned());
    notes
}

pub fn decline_reason(coverage_type: &str, carrier_name: &str) -> String {
    format!(
        "{carrier_name} has determined that this {coverage_type} coverage request is outside \
         our current risk appetite. Please consider alternative carriers."
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::request::PersonalInfo;

    use super::{highlights, optional_coverages, policy_form, underwriting_notes};

    #[test]
    fn known_coverages_have_specific_forms() {
        assert_eq!(policy_form("homeowners"), "HO-3");
        assert_eq!(policy_form("general_liability"), "ISO CGL");
        assert_eq!(policy_form("workers_compensation"), "Standard Form");
    }

    #[test]
    fn fallback_highlights_apply_to_unlisted_coverages() {
        let lines = highlights("workers_compensation");
        assert_eq!(lines[0], "Comprehensive coverage");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn optional_coverages_only_exist_for_select_lines() {
        assert_eq!(optional_coverages("general_liability").len(), 2);
        assert!(optional_coverages("homeowners").is_empty());
    }

    #[test]
    fn credit_tier_drives_personal_notes() {
        let info: PersonalInfo = serde_json::from_value(json!({
            "first_name": "Dana", "last_name": "Lee",
            "occupation": "teacher", "credit_score_tier": "excellent",
            "address": { "city": "Denver", "state": "CO", "zip": "80203" }
        }))
        .expect("personal fixture");

        let notes = underwriting_notes(None, Some(&info));
        assert!(notes.iter().any(|note| note.contains("15% discount")));
        assert_eq!(notes.last().map(String::as_str), Some("Standard underwriting approval"));
    }
}
