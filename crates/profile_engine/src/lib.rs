//! Pure computation over a [`models::FinancialProfile`].
//!
//! Everything in this crate is a total function: malformed or zero-valued
//! inputs resolve to 0.0 rather than NaN, infinity, or an error. Nothing here
//! performs I/O or mutates shared state, so the functions are safe to call
//! from any number of concurrent readers.

pub mod amortization;
pub mod interest;
pub mod normalize;
pub mod reconcile;
pub mod totals;

// Re-export commonly used items
pub use crate::amortization::{monthly_emi, yearly_interest_expense};
pub use crate::interest::yearly_interest_income;
pub use crate::normalize::monthly_equivalent;
pub use crate::reconcile::{reconcile_profile_vehicles, sync_vehicles_from_policies};
pub use crate::totals::{
    compute_totals, monthly_loan_emi, net_worth, total_assets, total_liabilities,
    total_monthly_expenses, total_monthly_income, value_per_sqft, ProfileTotals,
};
