use models::num::finite_or_zero;
use models::{FinancialEntry, Frequency};

/// Monthly-equivalent sum of a list of custom entries.
///
/// Yearly amounts are divided by twelve, monthly amounts pass through, and
/// non-finite amounts count as zero. A plain commutative sum: order never
/// matters, and an empty list is 0.
pub fn monthly_equivalent(entries: &[FinancialEntry]) -> f64 {
    entries
        .iter()
        .map(|entry| {
            let amount = finite_or_zero(entry.amount);
            match entry.frequency {
                Frequency::Yearly => amount / 12.0,
                Frequency::Monthly => amount,
            }
        })
        .sum()
}
