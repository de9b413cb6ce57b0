use models::num::finite_or_zero;
use models::{FinancialProfile, Property};
use serde::Serialize;

use crate::amortization::{monthly_emi, yearly_interest_expense};
use crate::interest::yearly_interest_income;
use crate::normalize::monthly_equivalent;

/// Derived figures for one profile, recomputed from the line items on every
/// read. Nothing here is ever written back or cached, so the totals cannot
/// drift from their sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileTotals {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub monthly_loan_emi: f64,
    pub yearly_interest_income: f64,
    pub yearly_interest_expense: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl ProfileTotals {
    /// Round every figure to 2 decimals for display or the wire.
    pub fn rounded(mut self) -> Self {
        self.monthly_income = round2(self.monthly_income);
        self.monthly_expenses = round2(self.monthly_expenses);
        self.monthly_savings = round2(self.monthly_savings);
        self.monthly_loan_emi = round2(self.monthly_loan_emi);
        self.yearly_interest_income = round2(self.yearly_interest_income);
        self.yearly_interest_expense = round2(self.yearly_interest_expense);
        self.total_assets = round2(self.total_assets);
        self.total_liabilities = round2(self.total_liabilities);
        self.net_worth = round2(self.net_worth);
        self
    }
}

pub fn compute_totals(profile: &FinancialProfile) -> ProfileTotals {
    let monthly_income = total_monthly_income(profile);
    let monthly_expenses = total_monthly_expenses(profile);
    let total_assets = total_assets(profile);
    let total_liabilities = total_liabilities(profile);
    ProfileTotals {
        monthly_income,
        monthly_expenses,
        monthly_savings: monthly_income - monthly_expenses,
        monthly_loan_emi: monthly_loan_emi(profile),
        yearly_interest_income: yearly_investment_interest(profile),
        yearly_interest_expense: yearly_loan_interest(profile),
        total_assets,
        total_liabilities,
        net_worth: total_assets - total_liabilities,
    }
}

/// Fixed monthly income + fixed yearly income / 12 + fixed-income instrument
/// interest / 12 + custom income entries.
pub fn total_monthly_income(profile: &FinancialProfile) -> f64 {
    let monthly_fixed = profile.rental_property1 + profile.rental_property2;
    let yearly_fixed = profile.salary_income
        + profile.business_income
        + profile.interest_income
        + profile.dividend_income
        + profile.capital_gains
        + profile.freelance_income
        + profile.other_income;
    finite_or_zero(
        monthly_fixed
            + (yearly_fixed + yearly_investment_interest(profile)) / 12.0
            + monthly_equivalent(&profile.income_entries),
    )
}

/// Fixed and variable monthly expenses + loan EMIs + yearly premiums / 12 +
/// custom expense entries.
pub fn total_monthly_expenses(profile: &FinancialProfile) -> f64 {
    let fixed_monthly = profile.rent_expense + profile.emis;
    let variable_monthly = profile.household_maid
        + profile.groceries
        + profile.food_dining
        + profile.fuel
        + profile.travel
        + profile.shopping
        + profile.online_shopping
        + profile.electronics
        + profile.entertainment
        + profile.telecom_utilities
        + profile.healthcare
        + profile.education
        + profile.cash_withdrawals
        + profile.foreign_transactions;
    let yearly_premiums = profile.term_insurance
        + profile.health_insurance
        + profile.vehicle_2w_1
        + profile.vehicle_2w_2
        + profile.vehicle_4w_1
        + profile.vehicle_4w_2
        + profile.vehicle_4w_3
        + policy_premiums(profile);
    finite_or_zero(
        fixed_monthly
            + variable_monthly
            + monthly_loan_emi(profile)
            + yearly_premiums / 12.0
            + monthly_equivalent(&profile.expense_entries),
    )
}

pub fn total_assets(profile: &FinancialProfile) -> f64 {
    let fixed = profile.gold_value
        + profile.silver_value
        + profile.stocks_value
        + profile.mutual_funds_value
        + profile.pf_nps_value
        + profile.bank_balance
        + profile.cash_in_hand;
    let properties: f64 = profile
        .properties
        .iter()
        .map(|p| finite_or_zero(p.estimated_value))
        .sum();
    let vehicles: f64 = profile
        .vehicles
        .iter()
        .map(|v| finite_or_zero(v.estimated_value))
        .sum();
    let instruments: f64 = profile
        .interest_investments
        .iter()
        .map(|inv| finite_or_zero(inv.principal_amount))
        .sum();
    let entries: f64 = profile
        .asset_entries
        .iter()
        .map(|e| finite_or_zero(e.amount))
        .sum();
    finite_or_zero(fixed + properties + vehicles + instruments + entries)
}

/// Full outstanding principal of every loan counts, independent of the EMI.
pub fn total_liabilities(profile: &FinancialProfile) -> f64 {
    let loans: f64 = profile
        .loans
        .iter()
        .map(|l| finite_or_zero(l.principal_amount))
        .sum();
    let entries: f64 = profile
        .liability_entries
        .iter()
        .map(|e| finite_or_zero(e.amount))
        .sum();
    finite_or_zero(loans + profile.credit_card_outstanding + entries)
}

pub fn net_worth(profile: &FinancialProfile) -> f64 {
    total_assets(profile) - total_liabilities(profile)
}

pub fn monthly_loan_emi(profile: &FinancialProfile) -> f64 {
    profile
        .loans
        .iter()
        .map(|l| monthly_emi(l.principal_amount, l.interest_rate, l.tenure_months))
        .sum()
}

pub fn yearly_investment_interest(profile: &FinancialProfile) -> f64 {
    profile
        .interest_investments
        .iter()
        .map(|inv| yearly_interest_income(inv.principal_amount, inv.interest_rate))
        .sum()
}

fn yearly_loan_interest(profile: &FinancialProfile) -> f64 {
    profile
        .loans
        .iter()
        .map(|l| yearly_interest_expense(l.principal_amount, l.interest_rate, l.tenure_months))
        .sum()
}

fn policy_premiums(profile: &FinancialProfile) -> f64 {
    profile
        .insurance_policies
        .iter()
        .map(|p| finite_or_zero(p.insurance_amount))
        .sum()
}

/// Market value per square foot, zero-guarded on area.
pub fn value_per_sqft(property: &Property) -> f64 {
    if property.area_sqft == 0.0 {
        return 0.0;
    }
    finite_or_zero(property.estimated_value / property.area_sqft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{FinancialEntry, Frequency, InterestInvestment, Loan, LoanType, Vehicle};

    fn entry(label: &str, amount: f64, frequency: Frequency) -> FinancialEntry {
        FinancialEntry {
            label: label.to_string(),
            amount,
            frequency,
        }
    }

    fn sample_profile() -> FinancialProfile {
        FinancialProfile {
            rental_property1: 10_000.0,
            salary_income: 1_200_000.0,
            rent_expense: 15_000.0,
            groceries: 5_000.0,
            term_insurance: 24_000.0,
            gold_value: 50_000.0,
            stocks_value: 200_000.0,
            bank_balance: 100_000.0,
            credit_card_outstanding: 25_000.0,
            loans: vec![Loan {
                loan_type: LoanType::Home,
                name: "HDFC Home Loan".to_string(),
                principal_amount: 120_000.0,
                interest_rate: 12.0,
                tenure_months: 12,
            }],
            interest_investments: vec![InterestInvestment {
                name: "HDFC Bank FD".to_string(),
                principal_amount: 100_000.0,
                interest_rate: 6.0,
                ..InterestInvestment::default()
            }],
            properties: vec![Property {
                name: "Flat".to_string(),
                estimated_value: 3_000_000.0,
                area_sqft: 1_200.0,
            }],
            vehicles: vec![Vehicle {
                estimated_value: 400_000.0,
                ..Vehicle::default()
            }],
            income_entries: vec![entry("Side gig", 1_200.0, Frequency::Yearly)],
            expense_entries: vec![entry("Gym", 1_000.0, Frequency::Monthly)],
            asset_entries: vec![entry("Art", 10_000.0, Frequency::Monthly)],
            liability_entries: vec![entry("Family debt", 5_000.0, Frequency::Monthly)],
            ..FinancialProfile::default()
        }
    }

    #[test]
    fn test_empty_profile_is_all_zero() {
        let totals = compute_totals(&FinancialProfile::default());
        assert_eq!(totals.monthly_income, 0.0);
        assert_eq!(totals.monthly_expenses, 0.0);
        assert_eq!(totals.total_assets, 0.0);
        assert_eq!(totals.total_liabilities, 0.0);
        assert_eq!(totals.net_worth, 0.0);
    }

    #[test]
    fn test_monthly_income_combines_all_sources() {
        let profile = sample_profile();
        // 10000 rental + (1.2M salary + 6000 FD interest) / 12 + 100 entry
        let expected = 10_000.0 + (1_200_000.0 + 6_000.0) / 12.0 + 100.0;
        assert!((total_monthly_income(&profile) - expected).abs() < 0.01);
    }

    #[test]
    fn test_monthly_expenses_include_loan_emi_and_premiums() {
        let profile = sample_profile();
        let emi = monthly_emi(120_000.0, 12.0, 12);
        let expected = 15_000.0 + 5_000.0 + emi + 24_000.0 / 12.0 + 1_000.0;
        assert!((total_monthly_expenses(&profile) - expected).abs() < 0.01);
    }

    #[test]
    fn test_liabilities_carry_full_principal_regardless_of_emi() {
        let profile = sample_profile();
        // 120000 loan principal + 25000 credit card + 5000 custom entry
        assert!((total_liabilities(&profile) - 150_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_net_worth_identity() {
        let profile = sample_profile();
        let totals = compute_totals(&profile);
        assert!(
            (totals.net_worth - (totals.total_assets - totals.total_liabilities)).abs() < 1e-9
        );
        // Assets: 350k fixed + 3M property + 400k vehicle + 100k FD + 10k entry
        assert!((totals.total_assets - 3_860_000.0).abs() < 1e-6);
        assert!((totals.net_worth - 3_710_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_malformed_amounts_never_reach_a_total() {
        let mut profile = sample_profile();
        profile.income_entries.push(entry("Broken", f64::NAN, Frequency::Monthly));
        profile.properties.push(Property {
            name: "Ghost".to_string(),
            estimated_value: f64::INFINITY,
            area_sqft: 0.0,
        });
        let totals = compute_totals(&profile);
        assert!(totals.monthly_income.is_finite());
        assert!(totals.total_assets.is_finite());
        assert!(totals.net_worth.is_finite());
    }

    #[test]
    fn test_value_per_sqft_zero_guard() {
        let property = Property {
            name: "Plot".to_string(),
            estimated_value: 3_000_000.0,
            area_sqft: 0.0,
        };
        assert_eq!(value_per_sqft(&property), 0.0);

        let property = Property {
            area_sqft: 1_200.0,
            ..property
        };
        assert!((value_per_sqft(&property) - 2_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_rounded_totals_have_two_decimals() {
        let totals = compute_totals(&sample_profile()).rounded();
        let cents = totals.monthly_expenses * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6);
    }
}
