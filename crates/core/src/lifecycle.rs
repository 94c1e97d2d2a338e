//! Policy lifecycle: binding a quote into a policy, then renewal quoting,
//! endorsements, cancellation, and certificates against the policy store.
//! Binding is intentionally not idempotent: every bind is a distinct
//! purchase and mints a fresh policy.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::carriers::{self, CarrierConfig};
use crate::dates;
use crate::domain::lifecycle::{
    BindRequest, BindResult, CancelRequest, CancellationResult, CertificateRequest,
    CertificateResult, EndorseRequest, EndorsementResult, LoyaltyDiscount, PaymentConfirmation,
    Refund, RefundBreakdown, RenewRequest, RenewalPremium, RenewalPremiumChange, RenewalQuote,
    RenewalQuoteDetail, UpdatedPolicySummary,
};
use crate::domain::policy::{
    CarrierContact, Certificate, CertificateCoverageSummary, CertificateDocument,
    CertificateHolderSummary, Endorsement, EndorsementPremiumChange, PaymentPlan, Policy,
    PolicyDocument, PolicyPremium, PolicyStatus, PolicyView,
};
use crate::errors::DomainError;
use crate::ident;
use crate::store::{PolicyStore, QuoteStore};

const DOCUMENT_BASE: &str = "https://carrier-simulator.example.com";
const ENDORSEMENT_FEE: i64 = 25;
const CANCELLATION_FEE: i64 = 50;
const POLICY_TERM_DAYS: i64 = 365;

pub struct PolicyLifecycle {
    quotes: Arc<QuoteStore>,
    policies: Arc<PolicyStore>,
}

impl PolicyLifecycle {
    pub fn new(quotes: Arc<QuoteStore>, policies: Arc<PolicyStore>) -> Self {
        Self { quotes, policies }
    }

    fn carrier(carrier_id: &str) -> Result<&'static CarrierConfig, DomainError> {
        carriers::carrier_config(carrier_id)
            .ok_or_else(|| DomainError::CarrierNotFound { carrier_id: carrier_id.to_owned() })
    }

    fn policy(&self, policy_id: &str) -> Result<Policy, DomainError> {
        self.policies
            .policy(policy_id)
            .ok_or_else(|| DomainError::PolicyNotFound { policy_id: policy_id.to_owned() })
    }

    /// Bind a quote into a policy. Fails before any store mutation; the
    /// expiry gate compares the current time against the quote's
    /// `valid_until` as stamped at synthesis.
    pub fn bind(&self, carrier_id: &str, request: &BindRequest) -> Result<BindResult, DomainError> {
        let carrier = Self::carrier(carrier_id)?;
        let record = self.quotes.get(&request.quote_id).ok_or_else(|| {
            DomainError::QuoteNotFound { quote_id: request.quote_id.clone() }
        })?;

        let now = Utc::now();
        if now > record.response.valid_until {
            return Err(DomainError::QuoteExpired {
                quote_id: request.quote_id.clone(),
                expired_at: record.response.valid_until,
            });
        }

        let selected = record
            .selected()
            .ok_or_else(|| DomainError::QuoteNotFound { quote_id: request.quote_id.clone() })?
            .clone();

        let recurring_amount = match request.payment_plan {
            PaymentPlan::Monthly => selected.premium.monthly,
            PaymentPlan::Quarterly => selected.premium.quarterly,
            PaymentPlan::Annual => selected.premium.annual,
        };

        let insured_name = record
            .request
            .business_info
            .as_ref()
            .map(|info| info.legal_name.clone())
            .or_else(|| {
                record
                    .request
                    .personal_info
                    .as_ref()
                    .map(|info| format!("{} {}", info.first_name, info.last_name))
            })
            .unwrap_or_default();
        let insured_address = record
            .request
            .business_info
            .as_ref()
            .map(|info| info.address.formatted())
            .or_else(|| record.request.personal_info.as_ref().map(|info| info.address.formatted()))
            .unwrap_or_default();

        let policy_id = ident::policy_id(carrier);
        let policy = Policy {
            policy_id: policy_id.clone(),
            policy_number: ident::policy_number(carrier, &selected.coverage_type),
            status: PolicyStatus::Bound,
            insurance_type: record.request.insurance_type,
            coverage_type: selected.coverage_type.clone(),
            effective_date: request.effective_date,
            expiration_date: selected.expiration_date,
            insured_name,
            insured_address,
            coverage_limits: selected.coverage_limits.clone(),
            premium: PolicyPremium {
                annual: selected.premium.annual,
                payment_plan: request.payment_plan,
                monthly_amount: recurring_amount,
                first_payment_due: request.effective_date,
                next_payment_date: dates::next_payment_date(
                    request.effective_date,
                    request.payment_plan,
                ),
            },
            deductible: selected.deductible.clone(),
            carrier_contact: carrier_contact(carrier_id),
            documents: vec![
                document(
                    "policy",
                    format!("{} Policy", selected.coverage_type),
                    format!("{DOCUMENT_BASE}/documents/{policy_id}/policy.pdf"),
                    Some(524_288),
                    now,
                ),
                document(
                    "declarations",
                    "Declarations Page".to_owned(),
                    format!("{DOCUMENT_BASE}/documents/{policy_id}/declarations.pdf"),
                    Some(102_400),
                    now,
                ),
            ],
            endorsements: Vec::new(),
            additional_insureds: request
                .insured_info
                .additional_insureds
                .clone()
                .unwrap_or_default(),
        };

        self.policies.insert(policy.clone());

        Ok(BindResult {
            success: true,
            carrier_id: carrier_id.to_owned(),
            bind_id: format!("{}-B-{}", carrier.prefix, now.timestamp_millis()),
            policy,
            payment_confirmation: PaymentConfirmation {
                payment_id: format!("pay_{}", Uuid::new_v4().simple()),
                amount: recurring_amount,
                currency: "USD".to_owned(),
                payment_method: format!(
                    "card_ending_{:04}",
                    rand::thread_rng().gen_range(0..10_000)
                ),
                status: "succeeded".to_owned(),
                receipt_url: format!(
                    "{DOCUMENT_BASE}/receipts/pay_{}.pdf",
                    now.timestamp_millis()
                ),
            },
            bound_at: now,
            confirmation_email_sent: true,
            next_steps: vec![
                "Policy documents are ready for download".to_owned(),
                format!("First payment will be charged on {}", request.effective_date),
                "Certificate of insurance available immediately".to_owned(),
                "24/7 customer service available".to_owned(),
            ],
        })
    }

    /// Read view with the time-to-expiration derived at call time.
    pub fn get_policy(
        &self,
        carrier_id: &str,
        policy_id: &str,
    ) -> Result<PolicyView, DomainError> {
        Self::carrier(carrier_id)?;
        let mut policy = self.policy(policy_id)?;

        let days_until_expiration =
            (policy.expiration_date - Utc::now().date_naive()).num_days();
        policy.status =
            if days_until_expiration < 0 { PolicyStatus::Expired } else { PolicyStatus::Active };

        Ok(PolicyView { policy, days_until_expiration })
    }

    /// Renewal quote: additive surcharges on the expiring premium, then a
    /// flat loyalty discount on the adjusted total. Advisory only; the
    /// stored policy is not touched.
    pub fn renew(
        &self,
        carrier_id: &str,
        policy_id: &str,
        request: &RenewRequest,
    ) -> Result<RenewalQuote, DomainError> {
        let carrier = Self::carrier(carrier_id)?;
        let policy = self.policy(policy_id)?;

        let base = policy.premium.annual;
        let mut adjusted = base as f64;
        let mut reasons = Vec::new();

        let business = request.business_changes.as_ref();
        if business.and_then(|changes| changes.revenue_changed).unwrap_or(false) {
            let increase = base as f64 * 0.10;
            adjusted += increase;
            reasons.push(format!(
                "Revenue increase: +10% (+${} premium)",
                increase.round() as i64
            ));
        }
        if business.and_then(|changes| changes.employees_changed).unwrap_or(false) {
            let increase = base as f64 * 0.05;
            adjusted += increase;
            reasons.push(format!(
                "Employee count increase: +5% (+${} premium)",
                increase.round() as i64
            ));
        }
        let coverage_changes = request.coverage_changes.as_ref();
        if coverage_changes.and_then(|changes| changes.increase_limits).unwrap_or(false) {
            let increase = base as f64 * 0.15;
            adjusted += increase;
            reasons.push(format!("Limit increase: +15% (+${} premium)", increase.round() as i64));
        }

        let discount = adjusted * 0.05;
        adjusted -= discount;
        reasons.push(format!("Loyalty discount: -5% (-${} premium)", discount.round() as i64));

        let new_premium = adjusted.round() as i64;
        let now = Utc::now();
        let renewal_quote_id = format!("{}-RQ-{}", carrier.prefix, now.timestamp_millis());
        let effective_date = request.desired_effective_date.unwrap_or(policy.expiration_date);

        Ok(RenewalQuote {
            success: true,
            renewal_quote_id: renewal_quote_id.clone(),
            original_policy_id: policy_id.to_owned(),
            renewal_status: "quoted".to_owned(),
            quote: RenewalQuoteDetail {
                quote_id: format!("{renewal_quote_id}-{}", policy.coverage_type),
                coverage_type: policy.coverage_type.clone(),
                effective_date,
                expiration_date: dates::plus_one_year(effective_date),
                coverage_limits: coverage_changes
                    .and_then(|changes| changes.new_limits.clone())
                    .unwrap_or_else(|| policy.coverage_limits.clone()),
                premium: RenewalPremium {
                    annual: new_premium,
                    monthly: (new_premium as f64 / 12.0).round() as i64,
                    quarterly: (new_premium as f64 / 4.0).round() as i64,
                },
                premium_change: RenewalPremiumChange {
                    amount: new_premium - base,
                    percentage: ((new_premium - base) as f64 / base as f64 * 100.0).round() as i64,
                    reasons,
                },
                deductible: policy.deductible.clone(),
                loyalty_discount: LoyaltyDiscount {
                    percentage: 5,
                    amount: discount.round() as i64,
                    description: "Claims-free discount".to_owned(),
                },
                valid_until: now + Duration::days(30),
                highlights: vec![
                    "All prior endorsements maintained".to_owned(),
                    "No underwriting required for renewal".to_owned(),
                    "Streamlined renewal process".to_owned(),
                ],
            },
            underwriting_notes: vec![
                "Positive renewal eligibility".to_owned(),
                "No claims in prior term".to_owned(),
                "Automatic renewal available".to_owned(),
            ],
            bind_eligibility: "eligible_automatic".to_owned(),
            next_steps: vec![
                "Review renewal quote".to_owned(),
                "Accept renewal to bind new policy".to_owned(),
                format!("Current policy expires {}", policy.expiration_date),
            ],
        })
    }

    /// Flat-fee endorsement, pro-rated to policy expiration, appended to the
    /// policy's endorsement list.
    pub fn endorse(
        &self,
        carrier_id: &str,
        policy_id: &str,
        request: &EndorseRequest,
    ) -> Result<EndorsementResult, DomainError> {
        let carrier = Self::carrier(carrier_id)?;
        let policy = self.policy(policy_id)?;

        let now = Utc::now();
        let endorsement_id = format!("{}-END-{}", carrier.prefix, now.timestamp_millis());
        let endorsement = Endorsement {
            endorsement_id: endorsement_id.clone(),
            policy_id: policy_id.to_owned(),
            status: "approved".to_owned(),
            endorsement_type: request.endorsement_type.clone(),
            effective_date: request.effective_date,
            premium_change: EndorsementPremiumChange {
                amount: ENDORSEMENT_FEE,
                annual_adjustment: ENDORSEMENT_FEE,
                pro_rated_charge: (ENDORSEMENT_FEE as f64 * 0.92).round() as i64,
                explanation: "Endorsement fee, pro-rated to policy expiration".to_owned(),
            },
            documents: vec![document(
                "endorsement",
                format!("Endorsement - {}", request.endorsement_type.replace('_', " ")),
                format!("{DOCUMENT_BASE}/documents/{endorsement_id}.pdf"),
                None,
                now,
            )],
            confirmation_email_sent: true,
            next_steps: vec![
                format!("Endorsement effective {}", request.effective_date),
                "Updated documents available for download".to_owned(),
                "New certificate of insurance can be generated".to_owned(),
            ],
        };

        let endorsements_count = self.policies.append_endorsement(policy_id, endorsement.clone());

        Ok(EndorsementResult {
            success: true,
            endorsement,
            updated_policy_summary: UpdatedPolicySummary {
                total_annual_premium: policy.premium.annual + ENDORSEMENT_FEE,
                endorsements_count,
            },
        })
    }

    /// Pro-rata cancellation math. Days active is deliberately unclamped: a
    /// cancellation effective before the policy's effective date yields a
    /// negative earned premium.
    pub fn cancel(
        &self,
        carrier_id: &str,
        policy_id: &str,
        request: &CancelRequest,
    ) -> Result<CancellationResult, DomainError> {
        let carrier = Self::carrier(carrier_id)?;
        let policy = self.policy(policy_id)?;

        let days_active = (request.effective_date - policy.effective_date).num_days();
        let fraction_earned = days_active as f64 / POLICY_TERM_DAYS as f64;
        let earned_premium = (policy.premium.annual as f64 * fraction_earned).round() as i64;
        let unearned_premium = policy.premium.annual - earned_premium;
        let net_refund = unearned_premium - CANCELLATION_FEE;

        let now = Utc::now();
        Ok(CancellationResult {
            success: true,
            cancellation_id: format!("{}-CAN-{}", carrier.prefix, now.timestamp_millis()),
            policy_id: policy_id.to_owned(),
            policy_number: policy.policy_number.clone(),
            status: PolicyStatus::PendingCancellation,
            effective_date: request.effective_date,
            cancellation_type: request.cancellation_type.clone(),
            refund: Refund {
                earned_premium,
                unearned_premium,
                cancellation_fee: CANCELLATION_FEE,
                short_rate_penalty: 0,
                net_refund,
                refund_method: "original_payment_method".to_owned(),
                estimated_refund_date: dates::plus_days(request.effective_date, 15),
                refund_breakdown: RefundBreakdown {
                    total_premium_paid: earned_premium,
                    days_policy_active: days_active,
                    total_days: POLICY_TERM_DAYS,
                    percentage_earned: (fraction_earned * 100.0).round() as i64,
                },
            },
            documents: vec![document(
                "cancellation_notice",
                "Cancellation Notice".to_owned(),
                format!(
                    "{DOCUMENT_BASE}/documents/cancellation_{}.pdf",
                    now.timestamp_millis()
                ),
                None,
                now,
            )],
            important_notes: vec![
                format!("Policy coverage ends at 12:01 AM on {}", request.effective_date),
                "No coverage after cancellation date".to_owned(),
                "Refund will be processed within 15 business days".to_owned(),
                "Consider obtaining replacement coverage before cancellation".to_owned(),
            ],
            confirmation_email_sent: true,
            next_steps: vec![
                "Cancellation notice sent to your email".to_owned(),
                format!("Secure replacement coverage before {}", request.effective_date),
                format!("Refund of ${net_refund} will be issued"),
            ],
        })
    }

    /// Certificate of insurance, derived from the policy's coverage summary
    /// and the holder details, appended to the policy's certificate list.
    pub fn certificate(
        &self,
        carrier_id: &str,
        policy_id: &str,
        request: &CertificateRequest,
    ) -> Result<CertificateResult, DomainError> {
        let carrier = Self::carrier(carrier_id)?;
        let policy = self.policy(policy_id)?;

        let now = Utc::now();
        let certificate_id = format!("{}-CERT-{}", carrier.prefix, now.timestamp_millis());
        let limits = policy
            .coverage_limits
            .values()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join("/");

        let certificate = Certificate {
            certificate_id: certificate_id.clone(),
            policy_id: policy_id.to_owned(),
            certificate_number: format!("CERT-{certificate_id}"),
            issued_date: now.date_naive(),
            certificate_holder: CertificateHolderSummary {
                name: request.certificate_holder.name.clone(),
                address: request.certificate_holder.address.formatted(),
            },
            format: "ACORD 25".to_owned(),
            document: CertificateDocument {
                url: format!("{DOCUMENT_BASE}/certificates/{certificate_id}.pdf"),
                format: "PDF".to_owned(),
                size_bytes: 245_760,
            },
            generated_at: now,
            expires_at: policy.expiration_date,
            coverage_summary: CertificateCoverageSummary {
                coverage_type: policy.coverage_type.clone(),
                limits,
                policy_number: policy.policy_number.clone(),
                effective_date: policy.effective_date,
                expiration_date: policy.expiration_date,
            },
            description_of_operations: request.description_of_operations.clone(),
            special_provisions: request.special_provisions.clone().unwrap_or_default(),
            confirmation_email_sent: true,
            next_steps: vec![
                "Certificate ready for download".to_owned(),
                "Valid until policy expiration".to_owned(),
                "Can generate additional certificates as needed".to_owned(),
            ],
        };

        self.policies.append_certificate(policy_id, certificate.clone());

        Ok(CertificateResult { success: true, certificate })
    }
}

fn carrier_contact(carrier_id: &str) -> CarrierContact {
    let domain = carrier_id.replace('_', "");
    CarrierContact {
        policy_service_phone: "1-800-555-0300".to_owned(),
        claims_phone: "1-800-555-0400".to_owned(),
        email: format!("service@{domain}.com"),
        claims_email: format!("claims@{domain}.com"),
    }
}

fn document(
    doc_type: &str,
    name: String,
    url: String,
    size_bytes: Option<u64>,
    generated_at: DateTime<Utc>,
) -> PolicyDocument {
    PolicyDocument { doc_type: doc_type.to_owned(), name, url, size_bytes, generated_at }
}
