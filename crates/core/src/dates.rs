//! Date arithmetic shared by the quote engine and the policy lifecycle.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::domain::policy::PaymentPlan;

/// Anniversary one year out. Feb 29 rolls forward to Mar 1 on non-leap
/// target years.
pub fn plus_one_year(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() + 1).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(date.year() + 1, 3, 1).unwrap_or(date)
    })
}

/// Next recurring payment after the first, per the selected plan. Month
/// arithmetic clamps to the last day of a shorter month.
pub fn next_payment_date(effective_date: NaiveDate, plan: PaymentPlan) -> NaiveDate {
    match plan {
        PaymentPlan::Monthly => {
            effective_date.checked_add_months(Months::new(1)).unwrap_or(effective_date)
        }
        PaymentPlan::Quarterly => {
            effective_date.checked_add_months(Months::new(3)).unwrap_or(effective_date)
        }
        PaymentPlan::Annual => plus_one_year(effective_date),
    }
}

pub fn plus_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}
