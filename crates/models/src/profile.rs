use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::num::lenient_amount;

/// How often a custom entry recurs. Yearly amounts are divided by twelve
/// before they enter any monthly total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    #[serde(alias = "Monthly")]
    Monthly,
    #[serde(alias = "Yearly")]
    Yearly,
}

/// A user-named income/expense/asset/liability line item.
///
/// The wire field is `type` for compatibility with older clients that sent
/// `{type, amount, frequency}` objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialEntry {
    #[serde(rename = "type", alias = "label")]
    pub label: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoanType {
    Home,
    Personal,
    Vehicle,
    Education,
    Gold,
    #[default]
    Other,
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoanType::Home => "Home",
            LoanType::Personal => "Personal",
            LoanType::Vehicle => "Vehicle",
            LoanType::Education => "Education",
            LoanType::Gold => "Gold",
            LoanType::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Loan {
    pub loan_type: LoanType,
    pub name: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub principal_amount: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub interest_rate: f64,
    pub tenure_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvestmentType {
    #[serde(rename = "FD", alias = "fd")]
    Fd,
    #[serde(rename = "RD", alias = "rd")]
    Rd,
    Bonds,
    Debentures,
    #[default]
    Other,
}

/// A fixed-income instrument accruing simple yearly interest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestInvestment {
    pub name: String,
    pub investment_type: InvestmentType,
    #[serde(deserialize_with = "lenient_amount")]
    pub principal_amount: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub interest_rate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub name: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub estimated_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub area_sqft: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VehicleType {
    #[default]
    #[serde(rename = "2-Wheeler", alias = "2-wheeler", alias = "2 Wheeler")]
    TwoWheeler,
    #[serde(rename = "4-Wheeler", alias = "4-wheeler", alias = "4 Wheeler")]
    FourWheeler,
}

impl VehicleType {
    /// Case-insensitive parse used for free-form policy fields, where the
    /// client may send an empty placeholder.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "2-wheeler" | "2 wheeler" | "two-wheeler" => Some(VehicleType::TwoWheeler),
            "4-wheeler" | "4 wheeler" | "four-wheeler" => Some(VehicleType::FourWheeler),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleType::TwoWheeler => f.write_str("2-Wheeler"),
            VehicleType::FourWheeler => f.write_str("4-Wheeler"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub vehicle_type: VehicleType,
    pub name: String,
    pub registration_number: String,
    #[serde(deserialize_with = "lenient_amount")]
    pub estimated_value: f64,
    pub is_insured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsuranceType {
    Health,
    Life,
    Vehicle,
}

impl InsuranceType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "health" => Some(InsuranceType::Health),
            "life" => Some(InsuranceType::Life),
            "vehicle" => Some(InsuranceType::Vehicle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dependent {
    pub name: String,
    pub relationship: String,
}

/// One insurance policy row. Health/life policies carry coverage details,
/// vehicle policies carry the vehicle type and registration number that seed
/// the vehicle list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InsurancePolicy {
    #[serde(rename = "type", deserialize_with = "lenient_insurance_type")]
    pub kind: Option<InsuranceType>,
    /// Yearly premium.
    #[serde(deserialize_with = "lenient_amount")]
    pub insurance_amount: f64,
    pub cover_self: bool,
    pub cover_spouse: bool,
    pub cover_dependents: bool,
    pub self_name: String,
    pub spouse_name: String,
    pub dependents: Vec<Dependent>,
    #[serde(deserialize_with = "lenient_vehicle_type")]
    pub vehicle_type: Option<VehicleType>,
    pub vehicle_number: String,
}

// The editor initializes new policy rows with empty-string selects, so these
// two fields tolerate anything and settle on None for unknown values.
fn lenient_insurance_type<'de, D>(deserializer: D) -> Result<Option<InsuranceType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(InsuranceType::parse))
}

fn lenient_vehicle_type<'de, D>(deserializer: D) -> Result<Option<VehicleType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(VehicleType::parse))
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }))
}

/// The single financial profile document owned by one user.
///
/// Fixed income fields: the two rental figures are monthly, the rest are
/// yearly. Fixed expense fields: rent and EMIs plus the variable categories
/// are monthly, insurance premiums are yearly. Totals are never stored here;
/// they are recomputed from the line items on every read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    // Income (monthly)
    #[serde(deserialize_with = "lenient_amount")]
    pub rental_property1: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub rental_property2: f64,
    // Income (yearly)
    #[serde(deserialize_with = "lenient_amount")]
    pub salary_income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub business_income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub interest_income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub dividend_income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub capital_gains: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub freelance_income: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub other_income: f64,

    // Fixed expenses (monthly)
    #[serde(deserialize_with = "lenient_amount")]
    pub rent_expense: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub emis: f64,
    // Fixed expenses (yearly premiums)
    #[serde(deserialize_with = "lenient_amount")]
    pub term_insurance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub health_insurance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub vehicle_2w_1: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub vehicle_2w_2: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub vehicle_4w_1: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub vehicle_4w_2: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub vehicle_4w_3: f64,

    // Variable expenses (monthly)
    #[serde(deserialize_with = "lenient_amount")]
    pub household_maid: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub groceries: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub food_dining: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub fuel: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub travel: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub shopping: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub online_shopping: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub electronics: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub entertainment: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub telecom_utilities: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub healthcare: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub education: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub cash_withdrawals: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub foreign_transactions: f64,

    // Assets
    #[serde(deserialize_with = "lenient_amount")]
    pub gold_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub silver_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub stocks_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub mutual_funds_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub pf_nps_value: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub bank_balance: f64,
    #[serde(deserialize_with = "lenient_amount")]
    pub cash_in_hand: f64,

    // Liabilities
    #[serde(deserialize_with = "lenient_amount")]
    pub credit_card_outstanding: f64,

    // Custom entries
    pub income_entries: Vec<FinancialEntry>,
    pub expense_entries: Vec<FinancialEntry>,
    pub asset_entries: Vec<FinancialEntry>,
    pub liability_entries: Vec<FinancialEntry>,

    // Structured sub-entities
    pub loans: Vec<Loan>,
    pub interest_investments: Vec<InterestInvestment>,
    pub properties: Vec<Property>,
    pub vehicles: Vec<Vehicle>,
    pub insurance_policies: Vec<InsurancePolicy>,

    // Financial stability
    pub has_health_insurance: bool,
    pub has_term_insurance: bool,
    pub invests_in_mutual_funds: bool,
    pub takes_tds_refund: bool,
    pub has_emergency_fund: bool,
    pub files_itr_yearly: bool,

    // Credit cards
    pub credit_cards: Vec<String>,

    #[serde(deserialize_with = "lenient_amount")]
    pub monthly_investment: f64,

    #[serde(deserialize_with = "lenient_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
}
