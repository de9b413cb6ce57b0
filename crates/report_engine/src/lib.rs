//! Report generation over transactions and the financial profile.
//!
//! Three read-only products: a P&L statement with by-category and
//! month-by-month breakdowns, a balance sheet derived from the profile's
//! line items, and the transaction-based quick health score shown on the
//! dashboard. All of it is recomputed per request; nothing is cached.

use std::collections::HashMap;

use models::num::finite_or_zero;
use models::{FinancialProfile, Transaction, TransactionKind};
use profile_engine::totals;
use serde::Serialize;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendPoint {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PLStatement {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit_loss: f64,
    pub income_by_category: HashMap<String, f64>,
    pub expenses_by_category: HashMap<String, f64>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

pub fn profit_and_loss(transactions: &[Transaction]) -> PLStatement {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut income_by_category: HashMap<String, f64> = HashMap::new();
    let mut expenses_by_category: HashMap<String, f64> = HashMap::new();
    // month -> (income, expenses)
    let mut by_month: HashMap<String, (f64, f64)> = HashMap::new();

    for txn in transactions {
        let amount = finite_or_zero(txn.amount);
        let category = if txn.category.is_empty() {
            "Other".to_string()
        } else {
            txn.category.clone()
        };
        let month = month_key(&txn.date);
        match txn.kind {
            TransactionKind::Income => {
                total_income += amount;
                *income_by_category.entry(category).or_insert(0.0) += amount;
                if let Some(month) = month {
                    by_month.entry(month).or_insert((0.0, 0.0)).0 += amount;
                }
            }
            TransactionKind::Expense => {
                total_expenses += amount;
                *expenses_by_category.entry(category).or_insert(0.0) += amount;
                if let Some(month) = month {
                    by_month.entry(month).or_insert((0.0, 0.0)).1 += amount;
                }
            }
        }
    }

    let mut monthly_trend: Vec<MonthlyTrendPoint> = by_month
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTrendPoint {
            month,
            income: round2(income),
            expenses: round2(expenses),
            net: round2(income - expenses),
        })
        .collect();
    monthly_trend.sort_by(|a, b| a.month.cmp(&b.month));

    for v in income_by_category.values_mut() {
        *v = round2(*v);
    }
    for v in expenses_by_category.values_mut() {
        *v = round2(*v);
    }

    PLStatement {
        total_income: round2(total_income),
        total_expenses: round2(total_expenses),
        net_profit_loss: round2(total_income - total_expenses),
        income_by_category,
        expenses_by_category,
        monthly_trend,
    }
}

/// `YYYY-MM` prefix of an ISO date; anything shorter is left out of the trend.
fn month_key(date: &str) -> Option<String> {
    let trimmed = date.trim();
    if trimmed.len() >= 7 && trimmed.is_char_boundary(7) {
        Some(trimmed[..7].to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyValuation {
    pub name: String,
    pub estimated_value: f64,
    pub area_sqft: f64,
    pub value_per_sqft: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceSheet {
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
    pub assets_breakdown: HashMap<String, f64>,
    pub liabilities_breakdown: HashMap<String, f64>,
    pub properties: Vec<PropertyValuation>,
}

/// Balance sheet straight off the profile's line items. The breakdown maps
/// only carry non-zero buckets.
pub fn balance_sheet(profile: &FinancialProfile) -> BalanceSheet {
    let mut assets_breakdown: HashMap<String, f64> = HashMap::new();
    let mut add_asset = |label: &str, value: f64| {
        let value = finite_or_zero(value);
        if value != 0.0 {
            *assets_breakdown.entry(label.to_string()).or_insert(0.0) += value;
        }
    };

    add_asset(
        "Properties",
        profile.properties.iter().map(|p| finite_or_zero(p.estimated_value)).sum(),
    );
    add_asset(
        "Vehicles",
        profile.vehicles.iter().map(|v| finite_or_zero(v.estimated_value)).sum(),
    );
    add_asset("Gold", profile.gold_value);
    add_asset("Silver", profile.silver_value);
    add_asset("Stocks", profile.stocks_value);
    add_asset("Mutual Funds", profile.mutual_funds_value);
    add_asset("PF / NPS", profile.pf_nps_value);
    add_asset("Bank Balance", profile.bank_balance);
    add_asset("Cash in Hand", profile.cash_in_hand);
    add_asset(
        "Fixed Income",
        profile
            .interest_investments
            .iter()
            .map(|inv| finite_or_zero(inv.principal_amount))
            .sum(),
    );
    for entry in &profile.asset_entries {
        let label = if entry.label.is_empty() { "Other" } else { entry.label.as_str() };
        add_asset(label, finite_or_zero(entry.amount));
    }

    let mut liabilities_breakdown: HashMap<String, f64> = HashMap::new();
    for loan in &profile.loans {
        let principal = finite_or_zero(loan.principal_amount);
        if principal != 0.0 {
            *liabilities_breakdown
                .entry(format!("{} Loans", loan.loan_type))
                .or_insert(0.0) += principal;
        }
    }
    let credit_cards = finite_or_zero(profile.credit_card_outstanding);
    if credit_cards != 0.0 {
        liabilities_breakdown.insert("Credit Cards".to_string(), credit_cards);
    }
    for entry in &profile.liability_entries {
        let amount = finite_or_zero(entry.amount);
        if amount != 0.0 {
            let label = if entry.label.is_empty() { "Other" } else { entry.label.as_str() };
            *liabilities_breakdown.entry(label.to_string()).or_insert(0.0) += amount;
        }
    }

    for v in assets_breakdown.values_mut() {
        *v = round2(*v);
    }
    for v in liabilities_breakdown.values_mut() {
        *v = round2(*v);
    }

    let properties = profile
        .properties
        .iter()
        .map(|p| PropertyValuation {
            name: p.name.clone(),
            estimated_value: round2(finite_or_zero(p.estimated_value)),
            area_sqft: round2(finite_or_zero(p.area_sqft)),
            value_per_sqft: round2(totals::value_per_sqft(p)),
        })
        .collect();

    let total_assets = totals::total_assets(profile);
    let total_liabilities = totals::total_liabilities(profile);
    BalanceSheet {
        total_assets: round2(total_assets),
        total_liabilities: round2(total_liabilities),
        net_worth: round2(total_assets - total_liabilities),
        assets_breakdown,
        liabilities_breakdown,
        properties,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuickHealthScore {
    pub score: u32,
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_savings: f64,
    pub savings_rate: f64,
    pub expense_to_income_ratio: f64,
    pub insights: Vec<String>,
}

/// Dashboard score over the transaction ledger: a base of 50 with bonuses
/// for a healthy savings rate and a low expense ratio.
pub fn quick_health_score(transactions: &[Transaction]) -> QuickHealthScore {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .map(|t| finite_or_zero(t.amount))
        .sum();
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .map(|t| finite_or_zero(t.amount))
        .sum();
    let net_savings = total_income - total_expenses;

    let savings_rate = if total_income > 0.0 {
        net_savings / total_income * 100.0
    } else {
        0.0
    };
    let expense_to_income_ratio = if total_income > 0.0 {
        total_expenses / total_income
    } else {
        0.0
    };

    let mut score: i32 = 50;
    if savings_rate >= 20.0 {
        score += 30;
    } else if savings_rate >= 10.0 {
        score += 15;
    }
    if expense_to_income_ratio <= 0.5 {
        score += 20;
    } else if expense_to_income_ratio <= 0.7 {
        score += 10;
    }
    let score = score.clamp(0, 100) as u32;

    let mut insights = Vec::new();
    if savings_rate < 10.0 {
        insights.push("Consider reducing expenses to improve your savings rate".to_string());
    } else if savings_rate >= 20.0 {
        insights.push("Excellent savings rate! You're on track for financial health".to_string());
    }
    if expense_to_income_ratio > 0.8 {
        insights
            .push("Your expenses are high relative to income. Review unnecessary spending".to_string());
    } else if expense_to_income_ratio <= 0.5 {
        insights.push("Great job keeping expenses low!".to_string());
    }
    if transactions.len() < 5 {
        insights.push("Add more transactions to get better insights".to_string());
    }

    QuickHealthScore {
        score,
        total_income: round2(total_income),
        total_expenses: round2(total_expenses),
        net_savings: round2(net_savings),
        savings_rate: round2(savings_rate),
        expense_to_income_ratio: round2(expense_to_income_ratio),
        insights,
    }
}
